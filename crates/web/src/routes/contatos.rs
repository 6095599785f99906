//! Contact form route handlers.
//!
//! Messages are forwarded to the parish API, which mails them to the
//! parish office.

use std::collections::HashMap;

use askama::Template;
use askama_web::WebTemplate;
use axum::{Form, extract::State};
use serde::Deserialize;
use tracing::{info, instrument, warn};

use paroquia_core::records::ContactForm;

use crate::filters;
use crate::middleware::OptionalUser;
use crate::routes::{Notice, SiteNav};
use crate::services::{CaptchaWidget, captcha};
use crate::state::AppState;

const SENT: &str = "Mensagem enviada! Responderemos em breve.";

/// Contact form as posted, CAPTCHA field included.
#[derive(Debug, Deserialize)]
pub struct ContactSubmission {
    #[serde(flatten)]
    pub form: ContactForm,
    #[serde(flatten)]
    pub extra: HashMap<String, String>,
}

/// Contact page template.
#[derive(Template, WebTemplate)]
#[template(path = "contatos.html")]
pub struct ContatosTemplate {
    pub nav: SiteNav,
    pub form: ContactForm,
    pub notice: Option<Notice>,
    pub captcha: Option<CaptchaWidget>,
}

impl ContatosTemplate {
    fn new(state: &AppState, user: Option<paroquia_core::UserRecord>) -> Self {
        Self {
            nav: SiteNav::new("contatos", user),
            form: ContactForm::default(),
            notice: None,
            captcha: CaptchaWidget::from_config(state.config().captcha.as_ref()),
        }
    }
}

/// Display the contact form.
pub async fn page(State(state): State<AppState>, OptionalUser(user): OptionalUser) -> ContatosTemplate {
    ContatosTemplate::new(&state, user)
}

/// Send a contact message.
///
/// On success the form is cleared; on any failure it comes back filled in
/// with the reason above it.
#[instrument(skip_all)]
pub async fn send(
    State(state): State<AppState>,
    OptionalUser(user): OptionalUser,
    Form(submission): Form<ContactSubmission>,
) -> ContatosTemplate {
    let mut template = ContatosTemplate::new(&state, user);

    let config = state.config().captcha.as_ref();
    let mut token = captcha::submitted(config, &submission.extra);

    let outcome = match submission.form.validate() {
        Err(e) => Err(e.to_string()),
        Ok(message) => match token.take(config.is_some()) {
            Err(e) => Err(e.to_string()),
            Ok(_) => state.api().send_contact(&message).await.map_err(|e| {
                warn!(error = %e, "Contact message not delivered");
                e.user_message("Não foi possível enviar a mensagem.")
            }),
        },
    };

    match outcome {
        Ok(()) => {
            info!("Contact message sent");
            template.notice = Some(Notice::success(SENT));
        }
        Err(message) => {
            template.notice = Some(Notice::error(message));
            template.form = submission.form;
        }
    }
    template
}

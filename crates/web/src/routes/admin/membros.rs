//! Back-office accounts screen. Admin only.

use paroquia_core::records::{AdminAccount, AdminAccountForm, AdminAccountPayload, FormError};

use crate::api::resources::Admins;
use crate::components::{DataTableConfig, FormField, TableColumn, TableRow};

use super::crud::AdminScreen;

pub struct MembrosScreen;

impl AdminScreen for MembrosScreen {
    type Api = Admins;
    type Form = AdminAccountForm;

    const SLUG: &'static str = "membros";
    const TITLE: &'static str = "Membros";
    const NOUN: &'static str = "membro";

    fn table() -> DataTableConfig {
        DataTableConfig::new("membros")
            .column(TableColumn::new("name", "Nome"))
            .column(TableColumn::new("email", "E-mail"))
            .column(TableColumn::compact("phone", "Telefone"))
            .column(TableColumn::compact("joined", "Desde"))
            .empty_state("Nenhum membro cadastrado", None)
    }

    fn row(account: &AdminAccount) -> TableRow {
        TableRow::new(
            account.id,
            vec![
                account.name.clone(),
                account.email.clone(),
                account.phone.clone(),
                account.joined.clone(),
            ],
        )
    }

    fn label(account: &AdminAccount) -> String {
        format!("{} <{}>", account.name, account.email)
    }

    fn fields(form: &AdminAccountForm, editing: bool) -> Vec<FormField> {
        let password = if editing {
            FormField::password("password", "Nova senha").hint("Deixe em branco para manter a senha atual.")
        } else {
            FormField::password("password", "Senha").required()
        };
        vec![
            FormField::text("name", "Nome", &form.name).required(),
            FormField::email("email", "E-mail", &form.email).required(),
            password,
            FormField::tel("phone", "Telefone", &form.phone),
        ]
    }

    fn edit_form(account: &AdminAccount) -> AdminAccountForm {
        AdminAccountForm::for_edit(account)
    }

    fn validate_create(form: &AdminAccountForm) -> Result<AdminAccountPayload, FormError> {
        form.validate_create()
    }

    fn validate_update(form: &AdminAccountForm) -> Result<AdminAccountPayload, FormError> {
        form.validate_update()
    }

    fn sort(accounts: &mut [AdminAccount]) {
        accounts.sort_by_key(|a| a.name.to_lowercase());
    }
}

//! CRUD collections exposed by the parish API.
//!
//! Every editable collection follows the same shape: `GET` and `POST` on the
//! collection path, `PUT` and `DELETE` on `{path}/{id}`. A [`Resource`] names
//! the path and the record, payload, and ID types so the client and the
//! back-office screens can be written once.

use std::fmt::Display;

use serde::{Serialize, de::DeserializeOwned};

use paroquia_core::records::{
    AdminAccount, AdminAccountPayload, AgendaItem, AgendaPayload, Aviso, AvisoPayload, Evento,
    EventoPayload, Horario, HorarioPayload,
};
use paroquia_core::{AdminAccountId, AgendaId, AvisoId, EventoId, HorarioId};

/// A CRUD collection of the parish API.
pub trait Resource: Send + Sync + 'static {
    /// Path relative to the API base URL, without slashes.
    const PATH: &'static str;

    type Id: Display + From<i64> + Copy + PartialEq + Send + Sync;
    type Record: DeserializeOwned + Clone + Send + Sync + 'static;
    type Payload: Serialize + Send + Sync;

    /// ID of a listed record.
    fn id(record: &Self::Record) -> Self::Id;
}

pub struct Agenda;

impl Resource for Agenda {
    const PATH: &'static str = "agenda";
    type Id = AgendaId;
    type Record = AgendaItem;
    type Payload = AgendaPayload;

    fn id(record: &AgendaItem) -> AgendaId {
        record.id
    }
}

pub struct Eventos;

impl Resource for Eventos {
    const PATH: &'static str = "eventos";
    type Id = EventoId;
    type Record = Evento;
    type Payload = EventoPayload;

    fn id(record: &Evento) -> EventoId {
        record.id
    }
}

pub struct Avisos;

impl Resource for Avisos {
    const PATH: &'static str = "avisos";
    type Id = AvisoId;
    type Record = Aviso;
    type Payload = AvisoPayload;

    fn id(record: &Aviso) -> AvisoId {
        record.id
    }
}

pub struct Horarios;

impl Resource for Horarios {
    const PATH: &'static str = "horarios";
    type Id = HorarioId;
    type Record = Horario;
    type Payload = HorarioPayload;

    fn id(record: &Horario) -> HorarioId {
        record.id
    }
}

pub struct Admins;

impl Resource for Admins {
    const PATH: &'static str = "admin_management/admins";
    type Id = AdminAccountId;
    type Record = AdminAccount;
    type Payload = AdminAccountPayload;

    fn id(record: &AdminAccount) -> AdminAccountId {
        record.id
    }
}

//! Request and response bodies.
//!
//! Field names match the JSON contract of the existing front-end (`nombre_etiqueta`,
//! `contenido`, `entrevistaId`, `numero_Entrevista`, `año`, ...), so Rust field names are
//! mapped with `serde(rename)` where they differ.

use chrono::{DateTime, Utc};
use entrevistas_core::validation::{parse_date, validate_tag_name};
use entrevistas_core::{
    EntrevistaError, Interview, InterviewSummary, InterviewWithNotes, NewInterview,
    NewInterviewNote, NewInterviewTag, NewNote, NonEmptyText, NoteRecord, Tag,
};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

/// Body of every non-2xx response.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ErrorRes {
    pub error: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct EtiquetaRes {
    pub id: i64,
    pub nombre_etiqueta: String,
}

impl From<Tag> for EtiquetaRes {
    fn from(tag: Tag) -> Self {
        Self {
            id: tag.id,
            nombre_etiqueta: tag.name,
        }
    }
}

/// Interview metadata embedded in a note.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct EntrevistaResumenRes {
    pub id: String,
    pub fecha: DateTime<Utc>,
    #[serde(rename = "numero_Entrevista")]
    pub numero_entrevista: u32,
    #[serde(rename = "año")]
    pub anio: i32,
}

impl From<InterviewSummary> for EntrevistaResumenRes {
    fn from(summary: InterviewSummary) -> Self {
        Self {
            id: summary.id,
            fecha: summary.date,
            numero_entrevista: summary.number,
            anio: summary.year,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TextoRes {
    pub id: String,
    #[serde(rename = "entrevistaId")]
    pub entrevista_id: String,
    pub nombre_etiqueta: String,
    pub contenido: String,
    pub fecha: DateTime<Utc>,
    pub contexto: Option<String>,
    pub etiqueta: EtiquetaRes,
    pub entrevista: EntrevistaResumenRes,
}

impl From<NoteRecord> for TextoRes {
    fn from(note: NoteRecord) -> Self {
        Self {
            id: note.id,
            entrevista_id: note.interview_id,
            nombre_etiqueta: note.tag_name,
            contenido: note.content,
            fecha: note.created_at,
            contexto: note.context,
            etiqueta: note.tag.into(),
            entrevista: note.interview.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct EntrevistaRes {
    pub id: String,
    #[serde(rename = "estudianteId")]
    pub estudiante_id: String,
    #[serde(rename = "usuarioId")]
    pub usuario_id: Option<String>,
    pub fecha: DateTime<Utc>,
    #[serde(rename = "nombre_Tutor")]
    pub nombre_tutor: Option<String>,
    #[serde(rename = "año")]
    pub anio: i32,
    #[serde(rename = "numero_Entrevista")]
    pub numero_entrevista: u32,
    pub duracion_minutos: Option<u32>,
    pub tipo_entrevista: Option<String>,
    pub estado: Option<String>,
    pub observaciones: Option<String>,
    pub temas_abordados: Option<String>,
    pub textos: Vec<TextoRes>,
}

impl From<InterviewWithNotes> for EntrevistaRes {
    fn from(value: InterviewWithNotes) -> Self {
        let Interview {
            id,
            student_id,
            interviewer_id,
            date,
            tutor_name,
            year,
            number,
            duration_minutes,
            interview_type,
            status,
            observations,
            topics,
        } = value.interview;

        Self {
            id,
            estudiante_id: student_id,
            usuario_id: interviewer_id,
            fecha: date,
            nombre_tutor: tutor_name,
            anio: year,
            numero_entrevista: number,
            duracion_minutos: duration_minutes,
            tipo_entrevista: interview_type,
            estado: status,
            observaciones: observations,
            temas_abordados: topics,
            textos: value.notes.into_iter().map(TextoRes::from).collect(),
        }
    }
}

/// Body of `POST /entrevistas/{id}/textos`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AddTextoReq {
    pub nombre_etiqueta: String,
    pub contenido: String,
    #[serde(default)]
    pub contexto: Option<String>,
}

impl TryFrom<AddTextoReq> for NewNote {
    type Error = EntrevistaError;

    fn try_from(req: AddTextoReq) -> Result<Self, Self::Error> {
        NewNote::new(req.nombre_etiqueta, req.contenido, req.contexto)
    }
}

/// A note supplied while creating an interview.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TextoInicialReq {
    pub contenido: String,
    /// RFC 3339 timestamp or `YYYY-MM-DD`.
    pub fecha: String,
    #[serde(default)]
    pub contexto: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct EtiquetaTextosReq {
    pub nombre_etiqueta: String,
    #[serde(default)]
    pub textos: Vec<TextoInicialReq>,
}

/// Body of `POST /entrevistas`.
///
/// `id_estudiante` and `id_usuario` accept either a JSON string or a number.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CreateEntrevistaReq {
    #[serde(deserialize_with = "string_or_number")]
    pub id_estudiante: String,
    #[serde(default, deserialize_with = "optional_string_or_number")]
    pub id_usuario: Option<String>,
    /// RFC 3339 timestamp or `YYYY-MM-DD`.
    pub fecha: String,
    #[serde(default)]
    pub nombre_tutor: Option<String>,
    #[serde(rename = "año")]
    pub anio: i32,
    pub numero_entrevista: u32,
    #[serde(default)]
    pub duracion_minutos: Option<u32>,
    #[serde(default)]
    pub tipo_entrevista: Option<String>,
    #[serde(default)]
    pub estado: Option<String>,
    #[serde(default)]
    pub observaciones: Option<String>,
    #[serde(default)]
    pub temas_abordados: Option<String>,
    #[serde(default)]
    pub etiquetas: Vec<EtiquetaTextosReq>,
}

impl TryFrom<CreateEntrevistaReq> for NewInterview {
    type Error = EntrevistaError;

    fn try_from(req: CreateEntrevistaReq) -> Result<Self, Self::Error> {
        let date = parse_date(&req.fecha)?;
        let mut interview =
            NewInterview::new(req.id_estudiante, req.anio, req.numero_entrevista, date);
        interview.interviewer_id = req.id_usuario;
        interview.tutor_name = req.nombre_tutor;
        interview.duration_minutes = req.duracion_minutos;
        interview.interview_type = req.tipo_entrevista;
        interview.status = req.estado;
        interview.observations = req.observaciones;
        interview.topics = req.temas_abordados;

        interview.tags = req
            .etiquetas
            .into_iter()
            .map(|etiqueta| -> Result<NewInterviewTag, EntrevistaError> {
                let name = validate_tag_name(etiqueta.nombre_etiqueta)?;
                let notes = etiqueta
                    .textos
                    .into_iter()
                    .map(|texto| -> Result<NewInterviewNote, EntrevistaError> {
                        Ok(NewInterviewNote {
                            content: NonEmptyText::new(texto.contenido)?,
                            date: parse_date(&texto.fecha)?,
                            context: texto.contexto,
                        })
                    })
                    .collect::<Result<Vec<_>, EntrevistaError>>()?;
                Ok(NewInterviewTag { name, notes })
            })
            .collect::<Result<Vec<_>, EntrevistaError>>()?;

        Ok(interview)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IdRepr {
    Text(String),
    Number(i64),
}

impl From<IdRepr> for String {
    fn from(value: IdRepr) -> Self {
        match value {
            IdRepr::Text(s) => s,
            IdRepr::Number(n) => n.to_string(),
        }
    }
}

fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    IdRepr::deserialize(deserializer).map(String::from)
}

fn optional_string_or_number<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Ok(Option::<IdRepr>::deserialize(deserializer)?.map(String::from))
}

//! # API REST
//!
//! REST API for interview notes.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON bodies, status codes, CORS)
//!
//! Uses `api-shared` for wire types and `entrevistas-core` for all data operations.

#![warn(rust_2018_idioms)]

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use api_shared::{
    AddTextoReq, CreateEntrevistaReq, EntrevistaRes, EntrevistaResumenRes, ErrorRes,
    EtiquetaRes, EtiquetaTextosReq, HealthRes, HealthService, TextoInicialReq, TextoRes,
};
use entrevistas_core::{EntrevistaError, NewInterview, NewNote, NoteHistoryService, NoteStore};

/// Application state shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    history: NoteHistoryService,
}

impl AppState {
    pub fn new(store: Arc<NoteStore>) -> Self {
        Self {
            history: NoteHistoryService::new(store),
        }
    }
}

type ApiError = (StatusCode, Json<ErrorRes>);

#[derive(OpenApi)]
#[openapi(
    paths(
        health,
        list_interviews,
        create_interview,
        interviews_for_student,
        history_for_student_tag,
        get_interview,
        notes_for_interview,
        add_note,
        list_tags,
    ),
    components(schemas(
        HealthRes,
        ErrorRes,
        EtiquetaRes,
        EntrevistaResumenRes,
        TextoRes,
        EntrevistaRes,
        AddTextoReq,
        TextoInicialReq,
        EtiquetaTextosReq,
        CreateEntrevistaReq,
    ))
)]
pub struct ApiDoc;

/// Build the application router with Swagger UI and permissive CORS.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/entrevistas", get(list_interviews).post(create_interview))
        .route(
            "/entrevistas/estudiante/:student_id",
            get(interviews_for_student),
        )
        .route(
            "/entrevistas/estudiante/:student_id/etiqueta/:tag_name/textos",
            get(history_for_student_tag),
        )
        .route("/entrevistas/:id", get(get_interview))
        .route(
            "/entrevistas/:id/textos",
            get(notes_for_interview).post(add_note),
        )
        .route("/etiquetas", get(list_tags))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind `addr` and serve the API until the process is stopped.
///
/// # Errors
/// Returns an error if the address cannot be bound or the server fails while running.
pub async fn serve(state: AppState, addr: &str) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("-- Entrevistas REST API listening on {}", addr);
    axum::serve(listener, router(state)).await
}

/// Map a core error onto a status code and JSON body. Server-side failures are logged and
/// reported with a generic message.
fn api_error(action: &str, err: EntrevistaError) -> ApiError {
    let status = if err.is_validation() {
        StatusCode::BAD_REQUEST
    } else if err.is_not_found() {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };

    let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
        tracing::error!("{} error: {:?}", action, err);
        "Internal error".to_string()
    } else {
        tracing::warn!("{} rejected: {}", action, err);
        err.to_string()
    };

    (status, Json(ErrorRes { error: message }))
}

/// Unwrap a JSON body, reporting a malformed or incomplete one as `400` with an `ErrorRes`.
fn json_body<T>(action: &str, payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    match payload {
        Ok(Json(value)) => Ok(value),
        Err(rejection) => {
            let message = rejection.body_text();
            tracing::warn!("{} rejected: {}", action, message);
            Err((StatusCode::BAD_REQUEST, Json(ErrorRes { error: message })))
        }
    }
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for monitoring and load balancers.
#[axum::debug_handler]
async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    get,
    path = "/entrevistas",
    responses(
        (status = 200, description = "All interviews, newest first", body = [EntrevistaRes]),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// List every interview together with its notes.
#[axum::debug_handler]
async fn list_interviews(
    State(state): State<AppState>,
) -> Result<Json<Vec<EntrevistaRes>>, ApiError> {
    let interviews = state
        .history
        .list_interviews()
        .map_err(|e| api_error("List interviews", e))?;
    Ok(Json(interviews.into_iter().map(EntrevistaRes::from).collect()))
}

#[utoipa::path(
    post,
    path = "/entrevistas",
    request_body = CreateEntrevistaReq,
    responses(
        (status = 201, description = "Interview created", body = EntrevistaRes),
        (status = 400, description = "Invalid input or duplicate interview", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Create an interview, optionally with initial notes grouped by tag.
///
/// # Errors
/// Returns `400 Bad Request` if:
/// - a field fails validation, or
/// - the student already has an interview with the same year and number.
#[axum::debug_handler]
async fn create_interview(
    State(state): State<AppState>,
    payload: Result<Json<CreateEntrevistaReq>, JsonRejection>,
) -> Result<(StatusCode, Json<EntrevistaRes>), ApiError> {
    let req = json_body("Create interview", payload)?;
    let input = NewInterview::try_from(req).map_err(|e| api_error("Create interview", e))?;
    let created = state
        .history
        .create_interview(input)
        .map_err(|e| api_error("Create interview", e))?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

#[utoipa::path(
    get,
    path = "/entrevistas/estudiante/{student_id}",
    params(("student_id" = String, Path, description = "Student identifier")),
    responses(
        (status = 200, description = "The student's interviews, newest first", body = [EntrevistaRes]),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
#[axum::debug_handler]
async fn interviews_for_student(
    State(state): State<AppState>,
    Path(student_id): Path<String>,
) -> Result<Json<Vec<EntrevistaRes>>, ApiError> {
    let interviews = state
        .history
        .interviews_for_student(&student_id)
        .map_err(|e| api_error("List student interviews", e))?;
    Ok(Json(interviews.into_iter().map(EntrevistaRes::from).collect()))
}

#[utoipa::path(
    get,
    path = "/entrevistas/estudiante/{student_id}/etiqueta/{tag_name}/textos",
    params(
        ("student_id" = String, Path, description = "Student identifier"),
        ("tag_name" = String, Path, description = "Exact tag name (percent-encoded)")
    ),
    responses(
        (status = 200, description = "Notes across all of the student's interviews, newest first", body = [TextoRes]),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Full note history for one student and one tag.
///
/// An unknown student simply has no interviews, so the result is an empty list.
#[axum::debug_handler]
async fn history_for_student_tag(
    State(state): State<AppState>,
    Path((student_id, tag_name)): Path<(String, String)>,
) -> Result<Json<Vec<TextoRes>>, ApiError> {
    let notes = state
        .history
        .history_for_student_tag(&student_id, &tag_name)
        .map_err(|e| api_error("Note history", e))?;
    Ok(Json(notes.into_iter().map(TextoRes::from).collect()))
}

#[utoipa::path(
    get,
    path = "/entrevistas/{id}",
    params(("id" = String, Path, description = "Interview identifier")),
    responses(
        (status = 200, description = "Interview with its notes", body = EntrevistaRes),
        (status = 404, description = "Interview not found", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
#[axum::debug_handler]
async fn get_interview(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<EntrevistaRes>, ApiError> {
    let interview = state
        .history
        .get_interview(&id)
        .map_err(|e| api_error("Get interview", e))?;
    Ok(Json(interview.into()))
}

#[utoipa::path(
    get,
    path = "/entrevistas/{id}/textos",
    params(("id" = String, Path, description = "Interview identifier")),
    responses(
        (status = 200, description = "Notes of one interview, newest first", body = [TextoRes]),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
#[axum::debug_handler]
async fn notes_for_interview(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<TextoRes>>, ApiError> {
    let notes = state
        .history
        .notes_for_interview(&id)
        .map_err(|e| api_error("List interview notes", e))?;
    Ok(Json(notes.into_iter().map(TextoRes::from).collect()))
}

#[utoipa::path(
    post,
    path = "/entrevistas/{id}/textos",
    params(("id" = String, Path, description = "Interview identifier")),
    request_body = AddTextoReq,
    responses(
        (status = 201, description = "Note created", body = TextoRes),
        (status = 400, description = "Missing, blank or malformed content or tag name", body = ErrorRes),
        (status = 404, description = "Interview not found", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Append a note to an interview, creating the tag on first use.
#[axum::debug_handler]
async fn add_note(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<AddTextoReq>, JsonRejection>,
) -> Result<(StatusCode, Json<TextoRes>), ApiError> {
    let req = json_body("Add note", payload)?;
    let note = NewNote::try_from(req).map_err(|e| api_error("Add note", e))?;
    let saved = state
        .history
        .add_note(&id, note)
        .map_err(|e| api_error("Add note", e))?;
    Ok((StatusCode::CREATED, Json(saved.into())))
}

#[utoipa::path(
    get,
    path = "/etiquetas",
    responses(
        (status = 200, description = "All tags ordered by name", body = [EtiquetaRes]),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
#[axum::debug_handler]
async fn list_tags(State(state): State<AppState>) -> Result<Json<Vec<EtiquetaRes>>, ApiError> {
    let tags = state
        .history
        .list_tags()
        .map_err(|e| api_error("List tags", e))?;
    Ok(Json(tags.into_iter().map(EtiquetaRes::from).collect()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn test_app() -> Router {
        router(AppState::new(Arc::new(NoteStore::open_in_memory().unwrap())))
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
        let resp = app.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if body.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body).unwrap()
        };
        (status, value)
    }

    async fn create_interview_for(app: &Router, student: &str, number: u32) -> String {
        let (status, body) = send(
            app,
            post_json(
                "/entrevistas",
                json!({
                    "id_estudiante": student,
                    "id_usuario": 7,
                    "fecha": format!("2024-03-{:02}", number),
                    "año": 2024,
                    "numero_entrevista": number,
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        body["id"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn health_is_ok() {
        let app = test_app();
        let (status, body) = send(&app, get("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ok"], true);
    }

    #[tokio::test]
    async fn unknown_student_history_is_empty() {
        let app = test_app();
        let (status, body) = send(
            &app,
            get("/entrevistas/estudiante/nobody/etiqueta/Health/textos"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn history_across_interviews_newest_first() {
        let app = test_app();
        let a = create_interview_for(&app, "S1", 1).await;
        let b = create_interview_for(&app, "S1", 2).await;

        let (status, _) = send(
            &app,
            post_json(
                &format!("/entrevistas/{a}/textos"),
                json!({"nombre_etiqueta": "Health", "contenido": "Good attendance"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let (status, created) = send(
            &app,
            post_json(
                &format!("/entrevistas/{b}/textos"),
                json!({"nombre_etiqueta": "Health", "contenido": "Missed three days", "contexto": "Entrevista con Ana"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["entrevistaId"], b.as_str());
        assert_eq!(created["contexto"], "Entrevista con Ana");
        assert_eq!(created["entrevista"]["numero_Entrevista"], 2);

        let (status, body) = send(
            &app,
            get("/entrevistas/estudiante/S1/etiqueta/Health/textos"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let contents: Vec<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|n| n["contenido"].as_str().unwrap())
            .collect();
        assert_eq!(contents, vec!["Missed three days", "Good attendance"]);
    }

    #[tokio::test]
    async fn percent_encoded_tag_name_is_decoded() {
        let app = test_app();
        let a = create_interview_for(&app, "S1", 1).await;
        send(
            &app,
            post_json(
                &format!("/entrevistas/{a}/textos"),
                json!({"nombre_etiqueta": "Rendimiento Académico", "contenido": "Mejoró en matemáticas"}),
            ),
        )
        .await;

        let (status, body) = send(
            &app,
            get("/entrevistas/estudiante/S1/etiqueta/Rendimiento%20Acad%C3%A9mico/textos"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);
        assert_eq!(body[0]["etiqueta"]["nombre_etiqueta"], "Rendimiento Académico");
    }

    #[tokio::test]
    async fn add_note_to_missing_interview_is_not_found_and_creates_no_tag() {
        let app = test_app();
        let (status, body) = send(
            &app,
            post_json(
                "/entrevistas/missing/textos",
                json!({"nombre_etiqueta": "Never seen", "contenido": "text"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["error"].as_str().unwrap().contains("missing"));

        let (_, tags) = send(&app, get("/etiquetas")).await;
        assert_eq!(tags, json!([]));
    }

    #[tokio::test]
    async fn blank_content_is_bad_request() {
        let app = test_app();
        let a = create_interview_for(&app, "S1", 1).await;
        let (status, body) = send(
            &app,
            post_json(
                &format!("/entrevistas/{a}/textos"),
                json!({"nombre_etiqueta": "Health", "contenido": "   "}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn missing_content_field_is_bad_request() {
        let app = test_app();
        let a = create_interview_for(&app, "S1", 1).await;
        let (status, body) = send(
            &app,
            post_json(
                &format!("/entrevistas/{a}/textos"),
                json!({"nombre_etiqueta": "Health"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("contenido"));

        let (_, notes) = send(&app, get(&format!("/entrevistas/{a}/textos"))).await;
        assert_eq!(notes, json!([]));
    }

    #[tokio::test]
    async fn malformed_interview_body_is_bad_request() {
        let app = test_app();
        let (status, body) = send(
            &app,
            post_json("/entrevistas", json!({"id_estudiante": "S1", "año": 2024})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());

        let (_, listed) = send(&app, get("/entrevistas")).await;
        assert_eq!(listed, json!([]));
    }

    #[tokio::test]
    async fn duplicate_interview_is_bad_request() {
        let app = test_app();
        create_interview_for(&app, "S1", 1).await;
        let (status, body) = send(
            &app,
            post_json(
                "/entrevistas",
                json!({"id_estudiante": "S1", "fecha": "2024-05-01", "año": 2024, "numero_entrevista": 1}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"]
            .as_str()
            .unwrap()
            .contains("interview 1 for year 2024"));
    }

    #[tokio::test]
    async fn reused_tag_name_is_not_duplicated() {
        let app = test_app();
        let a = create_interview_for(&app, "S1", 1).await;
        for content in ["one", "two"] {
            send(
                &app,
                post_json(
                    &format!("/entrevistas/{a}/textos"),
                    json!({"nombre_etiqueta": "Family", "contenido": content}),
                ),
            )
            .await;
        }

        let (_, tags) = send(&app, get("/etiquetas")).await;
        assert_eq!(tags.as_array().unwrap().len(), 1);
        assert_eq!(tags[0]["nombre_etiqueta"], "Family");
    }

    #[tokio::test]
    async fn interview_endpoints_return_nested_notes() {
        let app = test_app();
        let (status, created) = send(
            &app,
            post_json(
                "/entrevistas",
                json!({
                    "id_estudiante": 42,
                    "fecha": "2024-03-05T10:00:00Z",
                    "año": 2024,
                    "numero_entrevista": 3,
                    "nombre_tutor": "Prof. Rojas",
                    "etiquetas": [
                        {"nombre_etiqueta": "Health", "textos": [
                            {"contenido": "Initial note", "fecha": "2024-03-05T10:05:00Z"}
                        ]}
                    ]
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["estudianteId"], "42");
        assert_eq!(created["nombre_Tutor"], "Prof. Rojas");
        assert_eq!(created["textos"].as_array().unwrap().len(), 1);
        let id = created["id"].as_str().unwrap();

        let (status, fetched) = send(&app, get(&format!("/entrevistas/{id}"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched, created);

        let (_, notes) = send(&app, get(&format!("/entrevistas/{id}/textos"))).await;
        assert_eq!(notes[0]["contenido"], "Initial note");

        let (_, by_student) = send(&app, get("/entrevistas/estudiante/42")).await;
        assert_eq!(by_student.as_array().unwrap().len(), 1);

        let (_, all) = send(&app, get("/entrevistas")).await;
        assert_eq!(all.as_array().unwrap().len(), 1);

        let (status, _) = send(&app, get("/entrevistas/unknown")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}

//! Axum route handlers for the Resume API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::jobs::cards::{build_cards, JobCard};
use crate::jobs::client::ResumeUpload;
use crate::models::resume::ResumeAnalysis;
use crate::resumes::ats::AtsReport;
use crate::state::AppState;

/// Largest resume accepted, matching the upload widget's limit.
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;
const ALLOWED_EXTENSIONS: &[&str] = &["pdf", "doc", "docx", "txt"];

#[derive(Debug, Serialize)]
pub struct AnalyzeResumeResponse {
    pub analysis: ResumeAnalysis,
    pub ats: Option<AtsReport>,
    pub matches: Vec<JobCard>,
}

/// POST /api/v1/resumes/analyze
///
/// Accepts a multipart upload (field `file`), has the Job API analyze it, then
/// matches jobs against the summary, skills and keywords it extracted.
pub async fn handle_analyze_resume(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AnalyzeResumeResponse>, AppError> {
    let upload = read_upload(multipart).await?;
    let file_name = upload.file_name.clone();

    let analysis = state.job_board.analyze_resume(upload).await?;

    let query = analysis.match_query();
    let matches = if query.is_empty() {
        Vec::new()
    } else {
        state.job_board.match_jobs(&query).await?
    };
    info!("Resume {} analyzed, {} matching jobs", file_name, matches.len());

    Ok(Json(AnalyzeResumeResponse {
        ats: analysis.ats_score.as_ref().map(AtsReport::from_score),
        matches: build_cards(&matches, &state.formatter, false, true),
        analysis,
    }))
}

/// Pulls the `file` field out of the form and validates it.
async fn read_upload(mut multipart: Multipart) -> Result<ResumeUpload, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field
            .file_name()
            .map(str::to_string)
            .filter(|name| !name.trim().is_empty())
            .ok_or_else(|| AppError::Validation("Uploaded file has no name".to_string()))?;
        validate_extension(&file_name)?;
        let content_type = field.content_type().map(str::to_string);

        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
        if bytes.is_empty() {
            return Err(AppError::Validation("Uploaded file is empty".to_string()));
        }
        if bytes.len() > MAX_UPLOAD_BYTES {
            return Err(AppError::PayloadTooLarge(format!(
                "Resume exceeds {} MB",
                MAX_UPLOAD_BYTES / (1024 * 1024)
            )));
        }

        return Ok(ResumeUpload {
            file_name,
            content_type,
            bytes,
        });
    }

    Err(AppError::Validation(
        "Multipart field 'file' is required".to_string(),
    ))
}

fn validate_extension(file_name: &str) -> Result<(), AppError> {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    if ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
        Ok(())
    } else {
        Err(AppError::Validation(format!(
            "Unsupported file type '{file_name}'; expected PDF, DOC, DOCX or TXT"
        )))
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    use super::*;
    use crate::jobs::testing::{posting, read_json, test_router, StubJobBoard};
    use crate::models::resume::AtsScore;

    const BOUNDARY: &str = "X-RESUME-BOUNDARY";

    fn upload_request(field: &str, file_name: &str, contents: &[u8]) -> Request<Body> {
        let mut body = Vec::new();
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(b"Content-Type: application/pdf\r\n\r\n");
        body.extend_from_slice(contents);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

        Request::post("/api/v1/resumes/analyze")
            .header(
                "content-type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    #[test]
    fn test_validate_extension() {
        assert!(validate_extension("resume.PDF").is_ok());
        assert!(validate_extension("cv.docx").is_ok());
        assert!(validate_extension("notes.txt").is_ok());
        assert!(validate_extension("photo.png").is_err());
        assert!(validate_extension("resume").is_err());
    }

    #[tokio::test]
    async fn test_analyze_then_match() {
        let mut matched = posting("m1");
        matched.match_score = Some(0.81);
        let stub = StubJobBoard {
            analysis: ResumeAnalysis {
                summary: "Backend engineer".to_string(),
                skills: vec!["Rust".to_string()],
                keywords: vec!["latency".to_string()],
                ats_score: Some(AtsScore {
                    overall_score: 0.66,
                    ..AtsScore::default()
                }),
                ..ResumeAnalysis::default()
            },
            matches: vec![matched],
            ..StubJobBoard::default()
        };
        let calls = stub.calls.clone();
        let app = test_router(stub);

        let response = app
            .oneshot(upload_request("file", "resume.pdf", b"%PDF-1.4 fake"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body["ats"]["label"], "Good");
        assert_eq!(body["matches"][0]["job_id"], "m1");
        assert_eq!(body["matches"][0]["match_summary"]["tier"], "strong");
        assert_eq!(
            calls.lock().unwrap().as_slice(),
            [
                "analyze_resume(resume.pdf, 13 bytes)",
                "match_jobs(Backend engineer Rust latency)"
            ]
        );
    }

    #[tokio::test]
    async fn test_empty_analysis_skips_matching() {
        let stub = StubJobBoard::default();
        let calls = stub.calls.clone();
        let app = test_router(stub);

        let response = app
            .oneshot(upload_request("file", "resume.txt", b"hello"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert!(body["ats"].is_null());
        assert_eq!(body["matches"].as_array().unwrap().len(), 0);
        assert_eq!(calls.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_missing_file_field_is_rejected() {
        let app = test_router(StubJobBoard::default());
        let response = app
            .oneshot(upload_request("attachment", "resume.pdf", b"data"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unsupported_extension_is_rejected() {
        let app = test_router(StubJobBoard::default());
        let response = app
            .oneshot(upload_request("file", "selfie.png", b"data"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_oversized_upload_is_rejected() {
        let app = test_router(StubJobBoard::default());
        let contents = vec![b'a'; MAX_UPLOAD_BYTES + 1];
        let response = app
            .oneshot(upload_request("file", "resume.pdf", &contents))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }
}

//! AI-assisted interview feedback summarizer.
//!
//! Builds a structured assessment prompt from an interview response, calls
//! the model, and enriches the returned structure with locally computed
//! metrics. The model is treated as unreliable: any call or parse failure
//! degrades to a canned fallback summary rather than an error.

use chrono::Utc;
use ez2hire_core::error::CoreError;
use ez2hire_core::types::{DbId, Timestamp};
use ez2hire_db::models::interview::{Interview, InterviewResponse};
use ez2hire_db::models::user::User;
use ez2hire_db::repositories::{InterviewRepo, InterviewResponseRepo, UserRepo};
use ez2hire_db::DbPool;
use serde::{Deserialize, Serialize};

use crate::client::LlmClient;

const SYSTEM_PROMPT: &str = "You are an expert HR analyst and interview assessor. Provide \
detailed, actionable feedback based on interview responses. Be professional, constructive, \
and specific. Respond with a single JSON object and nothing else.";

// ---------------------------------------------------------------------------
// Report types
// ---------------------------------------------------------------------------

/// One scored assessment section of the model's analysis.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SectionScore {
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub assessment: String,
}

/// Locally computed metrics attached to every summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryMetadata {
    pub generated_at: Timestamp,
    pub response_id: DbId,
    pub total_words: usize,
    pub average_response_length: f64,
    pub completion_time_minutes: Option<i32>,
    pub original_ai_score: f64,
    pub fallback_mode: bool,
}

/// The summarizer's output: the model's analysis (leniently parsed -- every
/// field is optional/defaulted) plus [`SummaryMetadata`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SummaryReport {
    #[serde(default)]
    pub overall_summary: String,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub areas_for_improvement: Vec<String>,
    #[serde(default)]
    pub technical_competency: Option<SectionScore>,
    #[serde(default)]
    pub communication_skills: Option<SectionScore>,
    #[serde(default)]
    pub cultural_fit: Option<SectionScore>,
    #[serde(default)]
    pub recommended_next_steps: Vec<String>,
    #[serde(default)]
    pub recruiter_notes: String,
    #[serde(default)]
    pub hiring_recommendation: String,
    #[serde(default)]
    pub overall_score: Option<f64>,
    #[serde(default)]
    pub metadata: Option<SummaryMetadata>,
}

// ---------------------------------------------------------------------------
// FeedbackSummarizer
// ---------------------------------------------------------------------------

/// Generates AI summaries of interview responses.
pub struct FeedbackSummarizer {
    pool: DbPool,
    client: LlmClient,
}

impl FeedbackSummarizer {
    pub fn new(pool: DbPool, client: LlmClient) -> Self {
        Self { pool, client }
    }

    /// Summarize one interview response.
    ///
    /// Missing entities surface as [`CoreError::NotFound`]; model/parse
    /// failures degrade to the fallback summary.
    pub async fn summarize(&self, response_id: DbId) -> Result<SummaryReport, CoreError> {
        let response = InterviewResponseRepo::find_by_id(&self.pool, response_id)
            .await
            .map_err(|e| CoreError::Internal(e.to_string()))?
            .ok_or(CoreError::NotFound {
                entity: "InterviewResponse",
                id: response_id,
            })?;
        Ok(self.summarize_response(&response).await)
    }

    /// Summarize every response to an interview within one tenant. Each
    /// item is processed independently; a single response's failure yields
    /// its fallback entry, never aborts the batch.
    pub async fn summarize_batch(
        &self,
        interview_id: DbId,
        organization_id: DbId,
    ) -> Result<Vec<SummaryReport>, CoreError> {
        let responses =
            InterviewResponseRepo::list_for_interview(&self.pool, interview_id, organization_id)
                .await
                .map_err(|e| CoreError::Internal(e.to_string()))?;

        let mut reports = Vec::with_capacity(responses.len());
        for response in &responses {
            reports.push(self.summarize_response(response).await);
        }
        Ok(reports)
    }

    /// The fallible inner path with its fallback boundary.
    async fn summarize_response(&self, response: &InterviewResponse) -> SummaryReport {
        match self.analyze(response).await {
            Ok(report) => report,
            Err(err) => {
                tracing::error!(
                    response_id = response.id,
                    error = %err,
                    "AI summary failed, using fallback"
                );
                fallback_summary(response)
            }
        }
    }

    async fn analyze(&self, response: &InterviewResponse) -> Result<SummaryReport, CoreError> {
        let interview = InterviewRepo::find_by_id(&self.pool, response.interview_id)
            .await
            .map_err(|e| CoreError::Internal(e.to_string()))?
            .ok_or(CoreError::NotFound {
                entity: "Interview",
                id: response.interview_id,
            })?;
        let candidate = UserRepo::find_by_id(&self.pool, response.candidate_id)
            .await
            .map_err(|e| CoreError::Internal(e.to_string()))?
            .ok_or(CoreError::NotFound {
                entity: "User",
                id: response.candidate_id,
            })?;

        let answers = answer_texts(&response.answers);
        let prompt = build_prompt(&interview, &candidate, &answers, response);

        let analysis = self
            .client
            .complete_json(SYSTEM_PROMPT, &prompt)
            .await
            .map_err(|e| CoreError::Internal(e.to_string()))?;
        let mut report: SummaryReport =
            serde_json::from_value(analysis).map_err(|e| CoreError::Internal(e.to_string()))?;

        enrich_with_metrics(&mut report, response, &answers);
        Ok(report)
    }
}

// ---------------------------------------------------------------------------
// Pure helpers
// ---------------------------------------------------------------------------

/// Flatten the answers JSON object into its answer texts, in key order.
pub fn answer_texts(answers: &serde_json::Value) -> Vec<String> {
    match answers {
        serde_json::Value::Object(map) => map
            .values()
            .map(|v| match v {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect(),
        _ => Vec::new(),
    }
}

/// Build the structured assessment prompt.
fn build_prompt(
    interview: &Interview,
    candidate: &User,
    answers: &[String],
    response: &InterviewResponse,
) -> String {
    let formatted_answers: String = answers
        .iter()
        .enumerate()
        .map(|(i, answer)| format!("Q{}: {answer}\n", i + 1))
        .collect();

    format!(
        "Analyze this interview response and provide a comprehensive assessment in JSON format.\n\
         \n\
         INTERVIEW DETAILS:\n\
         - Position: {title}\n\
         \n\
         CANDIDATE DETAILS:\n\
         - Name: {name}\n\
         - Time Taken: {time} minutes\n\
         - Current AI Score: {score}/100\n\
         \n\
         INTERVIEW RESPONSES:\n\
         {formatted_answers}\n\
         Provide the analysis as a JSON object with these keys: overall_summary (2-3 sentence \
         overview), strengths (array), areas_for_improvement (array), technical_competency \
         ({{score, assessment}}), communication_skills ({{score, assessment}}), cultural_fit \
         ({{score, assessment}}), recommended_next_steps (array), recruiter_notes (string), \
         hiring_recommendation (one of \"Strong Hire\", \"Hire\", \"On the Fence\", \"No Hire\").",
        title = interview.title,
        name = candidate.display_name(),
        time = response
            .time_taken_minutes
            .map(|m| m.to_string())
            .unwrap_or_else(|| "unknown".to_string()),
        score = response.ai_score,
    )
}

/// Attach locally computed metrics: word counts, the mean of the section
/// scores as `overall_score`, and the metadata block.
pub fn enrich_with_metrics(
    report: &mut SummaryReport,
    response: &InterviewResponse,
    answers: &[String],
) {
    let total_words: usize = answers
        .iter()
        .map(|answer| answer.split_whitespace().count())
        .sum();
    let average = if answers.is_empty() {
        0.0
    } else {
        total_words as f64 / answers.len() as f64
    };

    let scores: Vec<f64> = [
        report.technical_competency.as_ref(),
        report.communication_skills.as_ref(),
        report.cultural_fit.as_ref(),
    ]
    .iter()
    .filter_map(|section| section.and_then(|s| s.score))
    .collect();
    if !scores.is_empty() {
        let mean = scores.iter().sum::<f64>() / scores.len() as f64;
        report.overall_score = Some((mean * 10.0).round() / 10.0);
    }

    report.metadata = Some(SummaryMetadata {
        generated_at: Utc::now(),
        response_id: response.id,
        total_words,
        average_response_length: (average * 10.0).round() / 10.0,
        completion_time_minutes: response.time_taken_minutes,
        original_ai_score: response.ai_score,
        fallback_mode: false,
    });
}

/// The canned summary used when AI analysis fails.
pub fn fallback_summary(response: &InterviewResponse) -> SummaryReport {
    SummaryReport {
        overall_summary: "Interview response recorded successfully. AI analysis temporarily \
                          unavailable."
            .to_string(),
        strengths: vec!["Response submitted within time limit".to_string()],
        areas_for_improvement: vec!["Detailed analysis pending".to_string()],
        recruiter_notes: "Please review responses manually or retry AI analysis.".to_string(),
        hiring_recommendation: "Pending Analysis".to_string(),
        overall_score: Some(response.ai_score),
        metadata: Some(SummaryMetadata {
            generated_at: Utc::now(),
            response_id: response.id,
            total_words: 0,
            average_response_length: 0.0,
            completion_time_minutes: response.time_taken_minutes,
            original_ai_score: response.ai_score,
            fallback_mode: true,
        }),
        ..SummaryReport::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(answers: serde_json::Value) -> InterviewResponse {
        InterviewResponse {
            id: 7,
            interview_id: 1,
            candidate_id: 2,
            organization_id: 3,
            answers,
            ai_score: 72.5,
            time_taken_minutes: Some(25),
            completed_at: Utc::now(),
        }
    }

    #[test]
    fn answer_texts_flattens_object_values() {
        let answers = json!({"q1": "first answer", "q2": "second one"});
        assert_eq!(answer_texts(&answers), vec!["first answer", "second one"]);
    }

    #[test]
    fn answer_texts_handles_non_object() {
        assert!(answer_texts(&json!(null)).is_empty());
        assert!(answer_texts(&json!("just text")).is_empty());
    }

    #[test]
    fn enrichment_computes_word_metrics() {
        let resp = response(json!({}));
        let answers = vec!["one two three".to_string(), "four five".to_string()];
        let mut report = SummaryReport::default();
        enrich_with_metrics(&mut report, &resp, &answers);

        let meta = report.metadata.expect("metadata should be attached");
        assert_eq!(meta.total_words, 5);
        assert_eq!(meta.average_response_length, 2.5);
        assert_eq!(meta.response_id, 7);
        assert!(!meta.fallback_mode);
    }

    #[test]
    fn enrichment_averages_section_scores() {
        let resp = response(json!({}));
        let mut report = SummaryReport {
            technical_competency: Some(SectionScore {
                score: Some(80.0),
                assessment: String::new(),
            }),
            communication_skills: Some(SectionScore {
                score: Some(70.0),
                assessment: String::new(),
            }),
            cultural_fit: Some(SectionScore {
                score: None,
                assessment: String::new(),
            }),
            ..SummaryReport::default()
        };
        enrich_with_metrics(&mut report, &resp, &[]);
        assert_eq!(report.overall_score, Some(75.0));
    }

    #[test]
    fn no_scores_leaves_overall_unset() {
        let resp = response(json!({}));
        let mut report = SummaryReport::default();
        enrich_with_metrics(&mut report, &resp, &[]);
        assert_eq!(report.overall_score, None);
    }

    #[test]
    fn fallback_carries_original_score_and_flag() {
        let resp = response(json!({}));
        let report = fallback_summary(&resp);
        assert_eq!(report.overall_score, Some(72.5));
        assert_eq!(report.hiring_recommendation, "Pending Analysis");
        assert!(report.metadata.unwrap().fallback_mode);
    }

    #[test]
    fn lenient_parse_of_partial_model_output() {
        let partial = json!({
            "overall_summary": "Solid candidate.",
            "strengths": ["clear communication"]
        });
        let report: SummaryReport = serde_json::from_value(partial).unwrap();
        assert_eq!(report.overall_summary, "Solid candidate.");
        assert_eq!(report.strengths.len(), 1);
        assert!(report.areas_for_improvement.is_empty());
        assert!(report.technical_competency.is_none());
    }
}

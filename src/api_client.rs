use crate::config::Config;
use crate::error::AppError;
use crate::models::{LanguageUsage, LeetCodeStats, sort_languages};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, warn};

// --- Data Structures for API Communication ---

const STATS_QUERY: &str = r#"query($username: String!) {
    matchedUser(username: $username) {
        submitStats {
            acSubmissionNum {
                difficulty
                count
            }
        }
        profile {
            ranking
        }
        languageProblemCount {
            languageName
            problemsSolved
        }
    }
    allQuestionsCount {
        difficulty
        count
    }
}"#;

#[derive(Serialize)]
struct GraphQlRequest<'a> {
    query: &'a str,
    variables: Variables<'a>,
}

#[derive(Serialize)]
struct Variables<'a> {
    username: &'a str,
}

#[derive(Deserialize, Debug)]
pub struct GraphQlResponse {
    data: Option<ResponseData>,
    // Key presence alone means the query failed, even `"errors": null`.
    #[serde(default, deserialize_with = "present")]
    errors: Option<serde_json::Value>,
}

/// `Some` whenever the key exists, keeping an explicit `null` as `Value::Null`.
fn present<'de, D>(deserializer: D) -> Result<Option<serde_json::Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    serde_json::Value::deserialize(deserializer).map(Some)
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct ResponseData {
    matched_user: Option<MatchedUser>,
    all_questions_count: Option<Vec<DifficultyCount>>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct MatchedUser {
    submit_stats: Option<SubmitStats>,
    profile: Option<Profile>,
    language_problem_count: Option<Vec<LanguageProblemCount>>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct SubmitStats {
    ac_submission_num: Option<Vec<DifficultyCount>>,
}

#[derive(Deserialize, Debug)]
struct Profile {
    ranking: Option<u64>,
}

#[derive(Deserialize, Debug)]
struct DifficultyCount {
    difficulty: String,
    count: u64,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct LanguageProblemCount {
    language_name: String,
    problems_solved: u64,
}

// --- Normalisation ---

/// Per-difficulty counts keyed by `"All"`, `"Easy"`, `"Medium"` and `"Hard"`.
struct DifficultyTable<'a>(HashMap<&'a str, u64>);

impl<'a> DifficultyTable<'a> {
    fn new(counts: &'a [DifficultyCount]) -> Self {
        Self(
            counts
                .iter()
                .map(|c| (c.difficulty.as_str(), c.count))
                .collect(),
        )
    }

    fn get(&self, difficulty: &str) -> u64 {
        self.0.get(difficulty).copied().unwrap_or(0)
    }
}

/// Turn a decoded response into a stats record.
///
/// Errors when the response carries GraphQL errors, has no `data`, or the
/// user does not exist. Missing counters and rank fall back to 0.
pub fn stats_from_response(
    response: GraphQlResponse,
    username: &str,
) -> Result<LeetCodeStats, AppError> {
    if let Some(errors) = response.errors {
        return Err(AppError::GraphQl(errors.to_string()));
    }

    let data = response.data.ok_or(AppError::MissingData)?;
    let user = data
        .matched_user
        .ok_or_else(|| AppError::UserNotFound(username.to_string()))?;

    let all_questions = data.all_questions_count.unwrap_or_default();
    let totals = DifficultyTable::new(&all_questions);

    let accepted = user
        .submit_stats
        .and_then(|s| s.ac_submission_num)
        .unwrap_or_default();
    let solved = DifficultyTable::new(&accepted);

    let global_rank = user.profile.and_then(|p| p.ranking).unwrap_or(0);

    let mut languages: Vec<LanguageUsage> = user
        .language_problem_count
        .unwrap_or_default()
        .into_iter()
        .map(|l| LanguageUsage::new(l.problems_solved, l.language_name))
        .collect();
    sort_languages(&mut languages);

    Ok(LeetCodeStats {
        total_solved: solved.get("All"),
        total_questions: totals.get("All"),
        global_rank,
        easy_solved: solved.get("Easy"),
        easy_total: totals.get("Easy"),
        medium_solved: solved.get("Medium"),
        medium_total: totals.get("Medium"),
        hard_solved: solved.get("Hard"),
        hard_total: totals.get("Hard"),
        languages,
    })
}

// --- API Client ---

pub struct LeetCodeClient {
    client: reqwest::Client,
    graphql_url: String,
    username: String,
}

impl LeetCodeClient {
    pub fn new(config: &Config) -> Self {
        Self {
            client: reqwest::Client::new(),
            graphql_url: config.graphql_url.clone(),
            username: config.username.clone(),
        }
    }

    pub async fn request_stats(&self) -> Result<LeetCodeStats, AppError> {
        let request_body = GraphQlRequest {
            query: STATS_QUERY,
            variables: Variables {
                username: &self.username,
            },
        };

        let response = self
            .client
            .post(&self.graphql_url)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::UpstreamStatus(status));
        }

        let body = response.text().await?;
        debug!(bytes = body.len(), "received GraphQL response");
        let parsed: GraphQlResponse = serde_json::from_str(&body)?;

        stats_from_response(parsed, &self.username)
    }

    /// Like [`request_stats`](Self::request_stats), but any failure yields the
    /// all-zero record so the card can still be rendered.
    pub async fn fetch_stats(&self) -> LeetCodeStats {
        match self.request_stats().await {
            Ok(stats) => stats,
            Err(e) => {
                warn!(username = %self.username, error = %e, "falling back to default stats");
                LeetCodeStats::default()
            }
        }
    }
}

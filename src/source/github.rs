//! GitHub REST client
//!
//! Sync HTTP via ureq. The user lookup must succeed; repositories and events
//! degrade to empty lists when their requests fail.

use super::{FetchError, FetchResult, MetricsSource};
use crate::config::GitHubConfig;
use crate::models::{ProfileMetrics, RepoSummary};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

const USER_AGENT: &str = concat!("guildcard/", env!("CARGO_PKG_VERSION"));

/// `/users/{login}` payload; only the fields we read
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiUser {
    pub login: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub public_repos: Option<i64>,
    #[serde(default)]
    pub followers: Option<i64>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// One entry of `/users/{login}/repos`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiRepo {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub stargazers_count: Option<i64>,
    #[serde(default)]
    pub forks_count: Option<i64>,
    #[serde(default)]
    pub language: Option<String>,
}

/// One entry of `/users/{login}/events`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiEvent {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

fn count(value: Option<i64>) -> u64 {
    value.unwrap_or(0).max(0) as u64
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Build `ProfileMetrics` from raw API payloads
pub fn normalize(user: ApiUser, repos: Vec<ApiRepo>, events: &[ApiEvent]) -> ProfileMetrics {
    let events_of = |kind: &str| {
        events
            .iter()
            .filter(|e| e.kind.as_deref() == Some(kind))
            .count() as u64
    };

    ProfileMetrics {
        commits: events_of("PushEvent"),
        prs: events_of("PullRequestEvent"),
        issues: events_of("IssuesEvent"),
        public_repos: count(user.public_repos),
        followers: count(user.followers),
        avatar_url: user.avatar_url.unwrap_or_default(),
        name: non_blank(user.name),
        company: non_blank(user.company),
        bio: non_blank(user.bio),
        created_at: user.created_at,
        login: user.login,
        repos: repos
            .into_iter()
            .map(|r| RepoSummary {
                name: r.name,
                description: non_blank(r.description),
                stars: count(r.stargazers_count),
                forks: count(r.forks_count),
                language: non_blank(r.language),
            })
            .collect(),
    }
}

/// GitHub logins: 1-39 chars, alphanumeric or single hyphens, no edge hyphen
pub fn is_valid_login(login: &str) -> bool {
    !login.is_empty()
        && login.len() <= 39
        && !login.starts_with('-')
        && !login.ends_with('-')
        && !login.contains("--")
        && login.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

/// Live metrics from the GitHub REST API
pub struct GitHubClient {
    api_url: String,
    token: Option<String>,
    agent: ureq::Agent,
}

impl GitHubClient {
    pub fn new(config: &GitHubConfig, token: Option<String>) -> Self {
        let agent = ureq::config::Config::builder()
            .http_status_as_error(false) // status codes map to FetchError below
            .timeout_global(Some(Duration::from_secs(config.timeout_secs.max(1))))
            .build()
            .new_agent();
        Self {
            api_url: config.api_url.trim_end_matches('/').to_string(),
            token,
            agent,
        }
    }

    fn get_json<T: DeserializeOwned>(&self, login: &str, path: &str) -> FetchResult<T> {
        let url = format!("{}{}", self.api_url, path);
        debug!("GET {}", url);

        let mut req = self
            .agent
            .get(&url)
            .header("Accept", "application/vnd.github+json")
            .header("User-Agent", USER_AGENT);
        if let Some(token) = &self.token {
            req = req.header("Authorization", &format!("token {}", token));
        }

        let response = req
            .call()
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        if status == 404 {
            return Err(FetchError::NotFound(login.to_string()));
        }
        if status >= 400 {
            let message = response.into_body().read_to_string().unwrap_or_default();
            return Err(FetchError::Http { status, message });
        }

        response
            .into_body()
            .read_json::<T>()
            .map_err(|e| FetchError::Parse(e.to_string()))
    }

    /// Optional endpoint: failures are logged and yield an empty list
    fn get_list<T: DeserializeOwned>(&self, login: &str, path: &str) -> Vec<T> {
        match self.get_json::<Vec<T>>(login, path) {
            Ok(items) => items,
            Err(e) => {
                warn!("Ignoring {} for {}: {}", path, login, e);
                Vec::new()
            }
        }
    }
}

impl MetricsSource for GitHubClient {
    fn name(&self) -> &'static str {
        "github"
    }

    fn fetch(&self, login: &str) -> FetchResult<ProfileMetrics> {
        if !is_valid_login(login) {
            return Err(FetchError::InvalidLogin(login.to_string()));
        }

        let user: ApiUser = self.get_json(login, &format!("/users/{login}"))?;
        let repos: Vec<ApiRepo> =
            self.get_list(login, &format!("/users/{login}/repos?per_page=100&sort=stars"));
        let events: Vec<ApiEvent> =
            self.get_list(login, &format!("/users/{login}/events?per_page=100"));

        debug!(
            "Fetched {}: {} repos, {} events",
            login,
            repos.len(),
            events.len()
        );
        Ok(normalize(user, repos, &events))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader, Write};
    use std::net::TcpListener;
    use std::thread;

    const USER_JSON: &str = r#"{
        "login": "octocat",
        "name": "The Octocat",
        "avatar_url": "https://avatars.githubusercontent.com/u/583231?v=4",
        "company": "@github",
        "bio": null,
        "public_repos": 8,
        "followers": 20,
        "created_at": "2011-01-25T18:44:36Z"
    }"#;

    const REPOS_JSON: &str = r#"[
        {"name": "hello-world", "description": "My first repo", "stargazers_count": 42, "forks_count": 7, "language": "Rust"},
        {"name": "spoon-knife", "description": "", "stargazers_count": 5, "forks_count": -1, "language": null},
        {"name": "bare"}
    ]"#;

    const EVENTS_JSON: &str = r#"[
        {"type": "PushEvent"}, {"type": "PushEvent"}, {"type": "PullRequestEvent"},
        {"type": "IssuesEvent"}, {"type": "WatchEvent"}, {}
    ]"#;

    /// Serve canned responses keyed by path prefix; unknown paths get 500
    fn serve(routes: Vec<(&'static str, u16, &'static str)>, requests: usize) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let addr = listener.local_addr().expect("addr");
        thread::spawn(move || {
            for stream in listener.incoming().take(requests) {
                let Ok(mut stream) = stream else { continue };
                let mut reader = BufReader::new(stream.try_clone().expect("clone"));
                let mut request_line = String::new();
                reader.read_line(&mut request_line).expect("request line");
                loop {
                    let mut header = String::new();
                    if reader.read_line(&mut header).unwrap_or(0) == 0 || header == "\r\n" {
                        break;
                    }
                }
                let path = request_line.split_whitespace().nth(1).unwrap_or("/");
                let (status, body) = routes
                    .iter()
                    .find(|(prefix, _, _)| path.starts_with(prefix))
                    .map(|(_, s, b)| (*s, *b))
                    .unwrap_or((500, "{}"));
                let response = format!(
                    "HTTP/1.1 {status} X\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = stream.write_all(response.as_bytes());
            }
        });
        format!("http://{addr}")
    }

    fn client(api_url: String) -> GitHubClient {
        let config = GitHubConfig {
            api_url,
            timeout_secs: 5,
        };
        GitHubClient::new(&config, Some("secret".into()))
    }

    #[test]
    fn test_normalize_counts_events_and_repos() {
        let user: ApiUser = serde_json::from_str(USER_JSON).unwrap();
        let repos: Vec<ApiRepo> = serde_json::from_str(REPOS_JSON).unwrap();
        let events: Vec<ApiEvent> = serde_json::from_str(EVENTS_JSON).unwrap();
        let m = normalize(user, repos, &events);

        assert_eq!(m.login, "octocat");
        assert_eq!(m.name.as_deref(), Some("The Octocat"));
        assert_eq!(m.public_repos, 8);
        assert_eq!(m.followers, 20);
        assert_eq!(m.commits, 2);
        assert_eq!(m.prs, 1);
        assert_eq!(m.issues, 1);
        assert_eq!(m.repos.len(), 3);
        assert_eq!(m.total_stars(), 47);
        assert_eq!(m.total_forks(), 7);
        assert_eq!(m.repos[1].description, None);
        assert_eq!(m.repos[2].stars, 0);
        assert!(m.bio.is_none());
        assert!(m.created_at.is_some());
    }

    #[test]
    fn test_normalize_minimal_user() {
        let user: ApiUser = serde_json::from_str(r#"{"login":"ghost"}"#).unwrap();
        let m = normalize(user, Vec::new(), &[]);
        assert_eq!(m, ProfileMetrics::empty("ghost"));
    }

    #[test]
    fn test_login_validation() {
        assert!(is_valid_login("octocat"));
        assert!(is_valid_login("a-b-c"));
        assert!(!is_valid_login(""));
        assert!(!is_valid_login("-edge"));
        assert!(!is_valid_login("double--dash"));
        assert!(!is_valid_login("../etc/passwd"));
        assert!(!is_valid_login(&"x".repeat(40)));
    }

    #[test]
    fn test_invalid_login_skips_network() {
        let c = client("http://127.0.0.1:9".into());
        assert!(matches!(
            c.fetch("not a login"),
            Err(FetchError::InvalidLogin(_))
        ));
    }

    #[test]
    fn test_fetch_full_profile() {
        let url = serve(
            vec![
                ("/users/octocat/repos", 200, REPOS_JSON),
                ("/users/octocat/events", 200, EVENTS_JSON),
                ("/users/octocat", 200, USER_JSON),
            ],
            3,
        );
        let m = client(url).fetch("octocat").expect("fetch");
        assert_eq!(m.followers, 20);
        assert_eq!(m.commits, 2);
        assert_eq!(m.repos.len(), 3);
    }

    #[test]
    fn test_fetch_degrades_when_repos_fail() {
        let url = serve(
            vec![
                ("/users/octocat/repos", 502, "bad gateway"),
                ("/users/octocat/events", 200, EVENTS_JSON),
                ("/users/octocat", 200, USER_JSON),
            ],
            3,
        );
        let m = client(url).fetch("octocat").expect("fetch");
        assert!(m.repos.is_empty());
        assert_eq!(m.prs, 1);
    }

    #[test]
    fn test_fetch_missing_user() {
        let url = serve(vec![("/users/ghost", 404, r#"{"message":"Not Found"}"#)], 1);
        let err = client(url).fetch("ghost").unwrap_err();
        assert!(matches!(err, FetchError::NotFound(ref l) if l == "ghost"));
    }

    #[test]
    fn test_fetch_http_error_status() {
        let url = serve(vec![("/users/limited", 403, "rate limited")], 1);
        let err = client(url).fetch("limited").unwrap_err();
        match err {
            FetchError::Http { status, message } => {
                assert_eq!(status, 403);
                assert_eq!(message, "rate limited");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}

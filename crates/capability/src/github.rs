// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Lattice Authors

//! The GitHub capability (spec.md §4.6, §6): outbound REST with a bearer
//! token (PAT or App installation token).

use crate::error::CapabilityError;
use crate::sprites::DEFAULT_TIMEOUT;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct Issue {
    pub number: u64,
    pub title: String,
    pub state: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PullRequest {
    pub number: u64,
    pub title: String,
    pub state: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Review {
    pub id: u64,
    pub state: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReviewComment {
    pub id: u64,
    pub body: String,
}

#[async_trait]
pub trait GitHubCapability: Send + Sync {
    async fn list_issues(&self, repo: &str) -> Result<Vec<Issue>, CapabilityError>;
    async fn get_issue(&self, repo: &str, number: u64) -> Result<Issue, CapabilityError>;
    async fn list_prs(&self, repo: &str) -> Result<Vec<PullRequest>, CapabilityError>;
    async fn list_reviews(&self, repo: &str, pr_number: u64) -> Result<Vec<Review>, CapabilityError>;
    async fn list_review_comments(
        &self,
        repo: &str,
        pr_number: u64,
    ) -> Result<Vec<ReviewComment>, CapabilityError>;
    async fn create_comment(&self, repo: &str, issue_number: u64, body: &str) -> Result<(), CapabilityError>;
    async fn add_label(&self, repo: &str, issue_number: u64, label: &str) -> Result<(), CapabilityError>;
    async fn remove_label(&self, repo: &str, issue_number: u64, label: &str) -> Result<(), CapabilityError>;
    async fn create_pr(&self, repo: &str, head: &str, base: &str, title: &str) -> Result<PullRequest, CapabilityError>;
    async fn merge_pr(&self, repo: &str, pr_number: u64) -> Result<(), CapabilityError>;
    async fn create_branch(&self, repo: &str, branch: &str, from_sha: &str) -> Result<(), CapabilityError>;
    async fn delete_branch(&self, repo: &str, branch: &str) -> Result<(), CapabilityError>;
}

pub struct LiveGitHub {
    client: reqwest::Client,
    token: String,
    base_url: String,
}

impl LiveGitHub {
    pub fn new(token: impl Into<String>) -> Self {
        Self::with_base_url("https://api.github.com", token)
    }

    pub fn with_base_url(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .user_agent("lattice")
            .build()
            .unwrap_or_default();
        Self { client, token: token.into(), base_url: base_url.into() }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    async fn send(&self, builder: reqwest::RequestBuilder) -> Result<reqwest::Response, CapabilityError> {
        let response =
            builder.bearer_auth(&self.token).send().await.map_err(CapabilityError::from_reqwest)?;
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(CapabilityError::from_status(status, body))
        }
    }

    async fn json<T: for<'de> Deserialize<'de>>(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> Result<T, CapabilityError> {
        self.send(builder).await?.json().await.map_err(|e| CapabilityError::InvalidResponse(e.to_string()))
    }
}

#[derive(Serialize)]
struct CommentBody<'a> {
    body: &'a str,
}

#[derive(Serialize)]
struct LabelsBody<'a> {
    labels: [&'a str; 1],
}

#[derive(Serialize)]
struct CreatePrBody<'a> {
    title: &'a str,
    head: &'a str,
    base: &'a str,
}

#[derive(Serialize)]
struct MergeBody {
    merge_method: &'static str,
}

#[derive(Serialize)]
struct CreateRefBody<'a> {
    r#ref: String,
    sha: &'a str,
}

#[async_trait]
impl GitHubCapability for LiveGitHub {
    async fn list_issues(&self, repo: &str) -> Result<Vec<Issue>, CapabilityError> {
        self.json(self.client.get(self.url(&format!("/repos/{repo}/issues")))).await
    }

    async fn get_issue(&self, repo: &str, number: u64) -> Result<Issue, CapabilityError> {
        self.json(self.client.get(self.url(&format!("/repos/{repo}/issues/{number}")))).await
    }

    async fn list_prs(&self, repo: &str) -> Result<Vec<PullRequest>, CapabilityError> {
        self.json(self.client.get(self.url(&format!("/repos/{repo}/pulls")))).await
    }

    async fn list_reviews(&self, repo: &str, pr_number: u64) -> Result<Vec<Review>, CapabilityError> {
        self.json(self.client.get(self.url(&format!("/repos/{repo}/pulls/{pr_number}/reviews")))).await
    }

    async fn list_review_comments(
        &self,
        repo: &str,
        pr_number: u64,
    ) -> Result<Vec<ReviewComment>, CapabilityError> {
        self.json(self.client.get(self.url(&format!("/repos/{repo}/pulls/{pr_number}/comments")))).await
    }

    async fn create_comment(&self, repo: &str, issue_number: u64, body: &str) -> Result<(), CapabilityError> {
        self.send(
            self.client
                .post(self.url(&format!("/repos/{repo}/issues/{issue_number}/comments")))
                .json(&CommentBody { body }),
        )
        .await?;
        Ok(())
    }

    async fn add_label(&self, repo: &str, issue_number: u64, label: &str) -> Result<(), CapabilityError> {
        self.send(
            self.client
                .post(self.url(&format!("/repos/{repo}/issues/{issue_number}/labels")))
                .json(&LabelsBody { labels: [label] }),
        )
        .await?;
        Ok(())
    }

    async fn remove_label(&self, repo: &str, issue_number: u64, label: &str) -> Result<(), CapabilityError> {
        self.send(
            self.client.delete(self.url(&format!("/repos/{repo}/issues/{issue_number}/labels/{label}"))),
        )
        .await?;
        Ok(())
    }

    async fn create_pr(
        &self,
        repo: &str,
        head: &str,
        base: &str,
        title: &str,
    ) -> Result<PullRequest, CapabilityError> {
        self.json(
            self.client
                .post(self.url(&format!("/repos/{repo}/pulls")))
                .json(&CreatePrBody { title, head, base }),
        )
        .await
    }

    async fn merge_pr(&self, repo: &str, pr_number: u64) -> Result<(), CapabilityError> {
        self.send(
            self.client
                .put(self.url(&format!("/repos/{repo}/pulls/{pr_number}/merge")))
                .json(&MergeBody { merge_method: "squash" }),
        )
        .await?;
        Ok(())
    }

    async fn create_branch(&self, repo: &str, branch: &str, from_sha: &str) -> Result<(), CapabilityError> {
        self.send(
            self.client.post(self.url(&format!("/repos/{repo}/git/refs"))).json(&CreateRefBody {
                r#ref: format!("refs/heads/{branch}"),
                sha: from_sha,
            }),
        )
        .await?;
        Ok(())
    }

    async fn delete_branch(&self, repo: &str, branch: &str) -> Result<(), CapabilityError> {
        self.send(self.client.delete(self.url(&format!("/repos/{repo}/git/refs/heads/{branch}")))).await?;
        Ok(())
    }
}

/// Canned implementation for tests and offline development.
#[derive(Default)]
pub struct StubGitHub;

impl StubGitHub {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl GitHubCapability for StubGitHub {
    async fn list_issues(&self, _repo: &str) -> Result<Vec<Issue>, CapabilityError> {
        Ok(Vec::new())
    }

    async fn get_issue(&self, _repo: &str, number: u64) -> Result<Issue, CapabilityError> {
        Ok(Issue { number, title: "stub issue".into(), state: "open".into() })
    }

    async fn list_prs(&self, _repo: &str) -> Result<Vec<PullRequest>, CapabilityError> {
        Ok(Vec::new())
    }

    async fn list_reviews(&self, _repo: &str, _pr_number: u64) -> Result<Vec<Review>, CapabilityError> {
        Ok(Vec::new())
    }

    async fn list_review_comments(
        &self,
        _repo: &str,
        _pr_number: u64,
    ) -> Result<Vec<ReviewComment>, CapabilityError> {
        Ok(Vec::new())
    }

    async fn create_comment(&self, _repo: &str, _issue_number: u64, _body: &str) -> Result<(), CapabilityError> {
        Ok(())
    }

    async fn add_label(&self, _repo: &str, _issue_number: u64, _label: &str) -> Result<(), CapabilityError> {
        Ok(())
    }

    async fn remove_label(&self, _repo: &str, _issue_number: u64, _label: &str) -> Result<(), CapabilityError> {
        Ok(())
    }

    async fn create_pr(
        &self,
        _repo: &str,
        head: &str,
        base: &str,
        title: &str,
    ) -> Result<PullRequest, CapabilityError> {
        let _ = (head, base);
        Ok(PullRequest { number: 1, title: title.to_string(), state: "open".into() })
    }

    async fn merge_pr(&self, _repo: &str, _pr_number: u64) -> Result<(), CapabilityError> {
        Ok(())
    }

    async fn create_branch(&self, _repo: &str, _branch: &str, _from_sha: &str) -> Result<(), CapabilityError> {
        Ok(())
    }

    async fn delete_branch(&self, _repo: &str, _branch: &str) -> Result<(), CapabilityError> {
        Ok(())
    }
}

#[cfg(test)]
#[path = "github_tests.rs"]
mod tests;

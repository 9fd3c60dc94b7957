use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use remark_client::{
    api::{
        Content, ContentId, Error, LikeToggle, NewComment, RawComment, Remote, RepliesQuery,
        UserId,
    },
    Timer,
};

/// Turns transport failures and non-success answers into API errors
async fn check(res: reqwest::Result<reqwest::Response>) -> Result<reqwest::Response, Error> {
    let resp = res.map_err(|e| Error::Network(e.to_string()))?;
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp
        .bytes()
        .await
        .map_err(|e| Error::Network(e.to_string()))?;
    Err(Error::parse(&body).unwrap_or_else(|err| {
        tracing::error!(%status, ?err, "failed parsing error response");
        Error::Unknown(format!("remote answered with status {status}"))
    }))
}

pub struct HttpRemote {
    host: String,
}

impl HttpRemote {
    pub fn new(host: String) -> HttpRemote {
        HttpRemote { host }
    }
}

#[async_trait(?Send)]
impl Remote for HttpRemote {
    async fn create_comment(&self, c: NewComment) -> Result<(), Error> {
        let req = crate::CLIENT
            .post(format!("{}/api/comments", self.host))
            .json(&c);
        check(req.send().await).await?;
        Ok(())
    }

    async fn toggle_comment_like(&self, t: LikeToggle) -> Result<(), Error> {
        let req = crate::CLIENT
            .post(format!("{}/api/comments/{}/like", self.host, t.comment_id))
            .json(&t);
        check(req.send().await).await?;
        Ok(())
    }

    async fn get_comment_replies(&self, q: RepliesQuery) -> Result<Vec<RawComment>, Error> {
        let mut req = crate::CLIENT.get(format!(
            "{}/api/comments/{}/replies",
            self.host, q.comment_id
        ));
        if let Some(user) = &q.user_id {
            req = req.query(&[("user_id", user.as_str())]);
        }
        check(req.send().await)
            .await?
            .json()
            .await
            .map_err(|e| Error::Unknown(format!("failed parsing replies: {e}")))
    }
}

pub async fn fetch_content(
    host: &str,
    content: &ContentId,
    viewer: &UserId,
) -> anyhow::Result<Content> {
    let req = crate::CLIENT
        .get(format!("{}/api/contents/{}", host, content))
        .query(&[("user_id", viewer.as_str())]);
    let resp = check(req.send().await)
        .await
        .with_context(|| format!("fetching content {content}"))?;
    resp.json().await.context("parsing content from server")
}

pub struct WasmTimer;

#[async_trait(?Send)]
impl Timer for WasmTimer {
    async fn sleep(&self, d: Duration) {
        if let Err(err) = wasm_timer::Delay::new(d).await {
            tracing::warn!(?err, "failed sleeping");
        }
    }
}

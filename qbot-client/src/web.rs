use crate::client_error;
use anyhow::{anyhow, Result};
use log::debug;
use qbot_codec::api::{self, ApiResponse, ConversationsOpen, RtmConnect, SelfInfo, UsersList};
use qbot_codec::event::UserInfo;
use serde::de::DeserializeOwned;
use url::Url;

const API_BASE: &str = "https://slack.com/api/";

/// Thin wrapper over the HTTP Web API. Cloning is cheap, the HTTP connection pool is shared.
#[derive(Clone)]
pub(crate) struct WebApi {
    http: reqwest::Client,
    token: String,
    base: Url,
}

impl WebApi {
    pub(crate) fn new(token: &str) -> Result<Self> {
        Ok(WebApi {
            http: reqwest::Client::new(),
            token: token.to_string(),
            base: Url::parse(API_BASE)?,
        })
    }

    async fn call<T: DeserializeOwned + ApiResponse>(&self, method: &str, params: &[(&str, &str)]) -> Result<T> {
        let url = self.base.join(method)?;

        debug!("Calling {}", url);

        let resp = self
            .http
            .post(url)
            .bearer_auth(&self.token)
            .form(params)
            .send()
            .await?;

        if !resp.status().is_success() {
            return client_error!(method, format!("http_{}", resp.status().as_u16()));
        }

        let body = resp.text().await?;
        let parsed: T = api::decode_response(&body).map_err(|e| anyhow!("Invalid {method} response: {e}"))?;

        if !parsed.ok() {
            return client_error!(method, parsed.error().unwrap_or("unknown_error"));
        }

        Ok(parsed)
    }

    /// Ask for a websocket URL and learn who we are.
    pub(crate) async fn rtm_connect(&self) -> Result<(String, SelfInfo)> {
        let resp: RtmConnect = self.call("rtm.connect", &[]).await?;

        match (resp.url, resp.bot) {
            (Some(url), Some(bot)) => Ok((url, bot)),
            _ => client_error!("rtm.connect", "incomplete_response"),
        }
    }

    /// Fetch every member of the workspace, following the pagination cursor.
    pub(crate) async fn users_list(&self) -> Result<Vec<UserInfo>> {
        let mut users = vec![];
        let mut cursor = String::new();

        loop {
            let mut params = vec![("limit", "200")];
            if !cursor.is_empty() {
                params.push(("cursor", cursor.as_str()));
            }

            let page: UsersList = self.call("users.list", &params).await?;
            let next = page.next_cursor().map(str::to_string);

            users.extend(page.members);

            match next {
                Some(c) => cursor = c,
                None => break,
            }
        }

        Ok(users)
    }

    /// Open (or reuse) the direct message channel with a user.
    pub(crate) async fn open_im(&self, user: &str) -> Result<String> {
        let resp: ConversationsOpen = self.call("conversations.open", &[("users", user)]).await?;

        match resp.channel {
            Some(channel) => Ok(channel.id),
            None => client_error!("conversations.open", "missing_channel"),
        }
    }
}

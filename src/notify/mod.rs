// ABOUTME: Best-effort lifecycle notifications to a Slack-compatible webhook.
// ABOUTME: Sends are spawned and never awaited; delivery failures are logged and discarded.

mod catalog;
mod context;

pub use catalog::{FALLBACK_LANGUAGE, Phrases, phrases};
pub use context::RunContext;

use serde_json::{Value, json};
use std::path::Path;

use crate::error::{Error, Result};

/// Notification inputs as supplied by the caller.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub webhook_url: Option<String>,
    pub channel: Option<String>,
    pub display_text: Option<String>,
    /// Language selector for the default templates; unknown values fall back.
    pub language: String,
    pub custom: Option<CustomBlocks>,
}

/// Caller-authored block documents. All three must be supplied for custom
/// blocks to replace the default templates.
#[derive(Debug, Clone)]
pub struct CustomBlocks {
    pub waiting: Value,
    pub success: Value,
    pub failure: Value,
}

impl CustomBlocks {
    pub fn load(waiting: &Path, success: &Path, failure: &Path) -> Result<Self> {
        Ok(Self {
            waiting: read_blocks(waiting)?,
            success: read_blocks(success)?,
            failure: read_blocks(failure)?,
        })
    }
}

fn read_blocks(path: &Path) -> Result<Value> {
    let text = std::fs::read_to_string(path)
        .map_err(|_| Error::FileNotFound(path.to_path_buf()))?;
    serde_json::from_str(&text).map_err(|_| {
        Error::InvalidConfig(format!("{} is not a JSON block document", path.display()))
    })
}

/// Sends lifecycle notifications for a run.
///
/// Every send is a background task submission: the spawned task is never
/// joined, and a failed delivery is logged at debug level and dropped. A slow
/// or dead webhook can therefore never delay or fail the deployment itself.
pub struct Notifier {
    client: reqwest::Client,
    webhook_url: String,
    channel: Option<String>,
    display_text: Option<String>,
    phrases: &'static Phrases,
    custom: Option<CustomBlocks>,
    context: RunContext,
}

impl Notifier {
    /// Build a notifier if a webhook destination is configured; `None` means
    /// the run proceeds without notifications.
    pub fn from_settings(settings: Settings, context: RunContext) -> Option<Self> {
        let webhook_url = settings.webhook_url.filter(|url| !url.is_empty())?;
        Some(Self {
            client: reqwest::Client::new(),
            webhook_url,
            channel: settings.channel,
            display_text: settings.display_text,
            phrases: phrases(&settings.language),
            custom: settings.custom,
            context,
        })
    }

    /// Fired right after a deployment request is accepted, before any waiting.
    pub fn deploy_started(&self, status_url: &str) {
        let blocks = match &self.custom {
            Some(custom) => custom.waiting.clone(),
            None => self.default_blocks(
                self.phrases.deploy_started,
                self.phrases.view_status,
                status_url,
            ),
        };
        self.post(blocks);
    }

    /// Fired once when the full sequence completes without error.
    pub fn deploy_succeeded(&self) {
        let blocks = match &self.custom {
            Some(custom) => custom.success.clone(),
            None => self.default_blocks(
                self.phrases.deploy_succeeded,
                self.phrases.confirm,
                &self.context.checks_url(),
            ),
        };
        self.post(blocks);
    }

    /// Fired once from the top-level failure path.
    pub fn deploy_failed(&self) {
        let blocks = match &self.custom {
            Some(custom) => custom.failure.clone(),
            None => self.default_blocks(
                self.phrases.deploy_failed,
                self.phrases.confirm,
                &self.context.checks_url(),
            ),
        };
        self.post(blocks);
    }

    fn default_blocks(&self, header: &str, button_text: &str, button_url: &str) -> Value {
        let p = self.phrases;
        let ctx = &self.context;
        json!([
            {
                "type": "section",
                "text": {
                    "type": "mrkdwn",
                    "text": format!(
                        "{} : {}\n{} : {}\n{} : {}\n{} : {}",
                        p.repository, ctx.repository,
                        p.branch, ctx.branch,
                        p.event, ctx.event,
                        p.commit, ctx.commit,
                    ),
                },
            },
            {
                "type": "header",
                "text": { "type": "plain_text", "text": header, "emoji": true },
            },
            {
                "type": "actions",
                "elements": [
                    {
                        "type": "button",
                        "text": { "type": "plain_text", "text": button_text, "emoji": true },
                        "url": button_url,
                    },
                    {
                        "type": "button",
                        "text": { "type": "plain_text", "text": p.commit_info, "emoji": true },
                        "url": ctx.commit_url(),
                    },
                ],
            },
        ])
    }

    fn payload(&self, blocks: Value) -> Value {
        let mut body = serde_json::Map::new();
        if let Some(channel) = &self.channel {
            body.insert("channel".to_string(), Value::String(channel.clone()));
        }
        if let Some(text) = &self.display_text {
            body.insert("text".to_string(), Value::String(text.clone()));
        }
        body.insert("blocks".to_string(), blocks);
        Value::Object(body)
    }

    fn post(&self, blocks: Value) {
        let client = self.client.clone();
        let url = self.webhook_url.clone();
        let body = self.payload(blocks);
        tokio::spawn(async move {
            if let Err(e) = client.post(&url).json(&body).send().await {
                tracing::debug!("notification delivery failed: {e}");
            }
        });
    }
}

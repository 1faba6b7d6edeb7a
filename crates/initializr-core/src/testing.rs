//! Test doubles shared by unit tests

use crate::action::Action;
use crate::commands::Downloader;
use crate::error::{Error, Result};
use crate::request::RequestParameters;
use crate::selection::{collect_picks, InputPattern, Prompter, SelectOption};
use std::collections::VecDeque;

enum Reply {
    One(String),
    Many(Vec<String>),
    Picks(Vec<String>),
    Text(String),
}

/// Prompter that replays queued answers; an empty queue behaves like a cancel
#[derive(Default)]
pub(crate) struct ScriptedPrompter {
    replies: VecDeque<Reply>,
    pub prompts: Vec<String>,
    pub initials: Vec<Option<String>>,
    pub defaults: Vec<String>,
    pub offered: Vec<Vec<SelectOption>>,
}

impl ScriptedPrompter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn choose(mut self, id: &str) -> Self {
        self.replies.push_back(Reply::One(id.to_string()));
        self
    }

    pub fn choose_many(mut self, ids: &[&str]) -> Self {
        self.replies
            .push_back(Reply::Many(ids.iter().map(|s| s.to_string()).collect()));
        self
    }

    /// Multi-select answered one pick at a time, like the terminal prompter
    pub fn pick_in_order(mut self, ids: &[&str]) -> Self {
        self.replies
            .push_back(Reply::Picks(ids.iter().map(|s| s.to_string()).collect()));
        self
    }

    pub fn answer(mut self, text: &str) -> Self {
        self.replies.push_back(Reply::Text(text.to_string()));
        self
    }
}

impl Prompter for ScriptedPrompter {
    fn select_one(
        &mut self,
        prompt: &str,
        options: &[SelectOption],
        initial: Option<&str>,
    ) -> Result<String> {
        self.prompts.push(prompt.to_string());
        self.initials.push(initial.map(str::to_string));
        self.offered.push(options.to_vec());
        match self.replies.pop_front() {
            Some(Reply::One(id)) => Ok(id),
            _ => Err(Error::aborted(prompt)),
        }
    }

    fn select_many(&mut self, prompt: &str, options: &[SelectOption]) -> Result<Vec<String>> {
        self.prompts.push(prompt.to_string());
        self.offered.push(options.to_vec());
        match self.replies.pop_front() {
            Some(Reply::Many(ids)) => Ok(ids),
            Some(Reply::Picks(ids)) => {
                let mut script = ids.into_iter();
                collect_picks(prompt, options, |remaining, _| {
                    Ok(script.next().and_then(|id| {
                        remaining.iter().position(|option| option.id == id)
                    }))
                })
            }
            _ => Err(Error::aborted(prompt)),
        }
    }

    fn input(
        &mut self,
        prompt: &str,
        default: &str,
        _pattern: Option<&InputPattern>,
    ) -> Result<String> {
        self.prompts.push(prompt.to_string());
        self.defaults.push(default.to_string());
        match self.replies.pop_front() {
            Some(Reply::Text(text)) => Ok(text),
            _ => Err(Error::aborted(prompt)),
        }
    }
}

/// Downloader that records the request and answers with a fixed name
pub(crate) struct RecordingDownloader {
    pub project_name: String,
    pub requests: Vec<(Action, String)>,
}

impl RecordingDownloader {
    pub fn new(project_name: &str) -> Self {
        Self {
            project_name: project_name.to_string(),
            requests: Vec::new(),
        }
    }
}

impl Downloader for RecordingDownloader {
    async fn download(&mut self, action: Action, parameters: &RequestParameters) -> Result<String> {
        self.requests.push((action, parameters.to_query_string()));
        Ok(self.project_name.clone())
    }
}

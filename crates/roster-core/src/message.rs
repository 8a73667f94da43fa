//! Outbound message types, serialised in the platform's wire shape.

use serde::{Deserialize, Serialize};

/// A message the bot sends (reply or multicast).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Message {
  Text {
    text: String,
  },
  Template {
    #[serde(rename = "altText")]
    alt_text: String,
    template: Template,
  },
}

impl Message {
  pub fn text(text: impl Into<String>) -> Self { Message::Text { text: text.into() } }

  pub fn as_text(&self) -> Option<&str> {
    match self {
      Message::Text { text } => Some(text),
      Message::Template { .. } => None,
    }
  }

  pub fn as_template(&self) -> Option<&Template> {
    match self {
      Message::Template { template, .. } => Some(template),
      Message::Text { .. } => None,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Template {
  Buttons {
    title:   String,
    text:    String,
    actions: Vec<Action>,
  },
}

impl Template {
  pub fn actions(&self) -> &[Action] {
    match self {
      Template::Buttons { actions, .. } => actions,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Action {
  Postback {
    label: String,
    data:  String,
    #[serde(rename = "displayText")]
    display_text: String,
  },
}

impl Action {
  pub fn data(&self) -> &str {
    match self {
      Action::Postback { data, .. } => data,
    }
  }

  pub fn label(&self) -> &str {
    match self {
      Action::Postback { label, .. } => label,
    }
  }
}

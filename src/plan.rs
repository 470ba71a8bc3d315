use url::Url;

/// A selectable control. `value` is the callback token sent back when it's pressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub label: String,
    pub value: String,
}

impl Choice {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Link {
    pub label: String,
    pub url: Url,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outbound {
    pub text: String,
    /// When set the message is sent as a photo with `text` as its caption.
    pub photo: Option<Url>,
    pub choices: Vec<Choice>,
    pub links: Vec<Link>,
}

impl Outbound {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            photo: None,
            choices: Vec::new(),
            links: Vec::new(),
        }
    }

    pub fn photo(url: Url, caption: impl Into<String>) -> Self {
        Self {
            photo: Some(url),
            ..Self::text(caption)
        }
    }

    pub fn with_choices(mut self, choices: impl IntoIterator<Item = Choice>) -> Self {
        self.choices.extend(choices);
        self
    }

    pub fn with_link(mut self, link: Link) -> Self {
        self.links.push(link);
        self
    }
}

/// Messages to deliver, in order. Empty when the action was ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Plan {
    pub messages: Vec<Outbound>,
}

impl Plan {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn push(mut self, message: Outbound) -> Self {
        self.messages.push(message);
        self
    }
}

impl From<Outbound> for Plan {
    fn from(message: Outbound) -> Self {
        Self {
            messages: vec![message],
        }
    }
}

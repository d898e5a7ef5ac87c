/// Information about a Claude model's limits.
#[derive(Clone, Debug)]
pub struct ClaudeModelInfo {
    pub name: &'static str,
    pub max_output: u32,
}

impl ClaudeModelInfo {
    /// Clamp a requested output budget to what the model accepts.
    pub fn clamp_max_tokens(&self, requested: u32) -> u32 {
        requested.min(self.max_output)
    }
}

pub static CLAUDE_3_5_SONNET: ClaudeModelInfo = ClaudeModelInfo {
    name: "claude-3-5-sonnet-20241022",
    max_output: 8_192,
};

pub static CLAUDE_3_5_HAIKU: ClaudeModelInfo = ClaudeModelInfo {
    name: "claude-3-5-haiku-20241022",
    max_output: 8_192,
};

pub static CLAUDE_SONNET_4_5: ClaudeModelInfo = ClaudeModelInfo {
    name: "claude-sonnet-4-5-20250929",
    max_output: 64_000,
};

static ALL_MODELS: &[&ClaudeModelInfo] =
    &[&CLAUDE_3_5_SONNET, &CLAUDE_3_5_HAIKU, &CLAUDE_SONNET_4_5];

pub fn find_model(name: &str) -> Option<&'static ClaudeModelInfo> {
    ALL_MODELS.iter().find(|m| m.name == name).copied()
}

pub fn default_model() -> &'static ClaudeModelInfo {
    &CLAUDE_3_5_SONNET
}

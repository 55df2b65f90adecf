use crate::assets::AssetStore;
use crate::config::DispatchConfig;
use crate::mention::parse_mention;
use crate::sampler::UnsolicitedSampler;
use crate::types::{GenerationParams, InboundMessage};
use rand::Rng;
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeywordCommand {
    AvatarEcho,
    StaticImage,
    Storytime,
}

/// Keyword commands in priority order. The first keyword that matches wins,
/// so `@bot monkey storytime` is an avatar echo.
pub const KEYWORD_COMMANDS: &[(&str, KeywordCommand)] = &[
    ("monkey", KeywordCommand::AvatarEcho),
    ("image", KeywordCommand::StaticImage),
    ("storytime", KeywordCommand::Storytime),
];

/// Only consulted once a plain mention arrives with image attachments.
pub const IDENTIFY_KEYWORD: &str = "identify";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoOpReason {
    SelfAuthored,
    NoImageAttachments,
    UnsolicitedSkipped,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaptionTarget {
    pub url: String,
    pub params: GenerationParams,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DispatchDecision {
    NoOp {
        reason: NoOpReason,
    },
    AvatarEcho {
        avatar_url: String,
    },
    StaticImage {
        url: String,
    },
    LongForm {
        prompt: String,
        params: GenerationParams,
    },
    ShortGeneration {
        prompt: String,
        params: GenerationParams,
    },
    CaptionedReply {
        remainder: String,
        images: Vec<CaptionTarget>,
    },
    IdentifyOnly {
        image_urls: Vec<String>,
    },
    Unsolicited {
        prompt: String,
        params: GenerationParams,
    },
}

impl DispatchDecision {
    pub fn kind(&self) -> &'static str {
        match self {
            DispatchDecision::NoOp { .. } => "no_op",
            DispatchDecision::AvatarEcho { .. } => "avatar_echo",
            DispatchDecision::StaticImage { .. } => "static_image",
            DispatchDecision::LongForm { .. } => "long_form",
            DispatchDecision::ShortGeneration { .. } => "short_generation",
            DispatchDecision::CaptionedReply { .. } => "captioned_reply",
            DispatchDecision::IdentifyOnly { .. } => "identify_only",
            DispatchDecision::Unsolicited { .. } => "unsolicited",
        }
    }

    pub fn is_no_op(&self) -> bool {
        matches!(self, DispatchDecision::NoOp { .. })
    }
}

#[derive(Debug, Clone)]
pub struct Dispatcher {
    bot_name: String,
    assets: Arc<AssetStore>,
    settings: DispatchConfig,
    unsolicited: UnsolicitedSampler,
}

impl Dispatcher {
    pub fn new(
        bot_name: impl Into<String>,
        assets: Arc<AssetStore>,
        settings: DispatchConfig,
    ) -> Self {
        let unsolicited = UnsolicitedSampler::new(settings.unsolicited_chance_percent);
        Self {
            bot_name: bot_name.into(),
            assets,
            settings,
            unsolicited,
        }
    }

    pub fn bot_name(&self) -> &str {
        &self.bot_name
    }

    pub fn dispatch<R: Rng + ?Sized>(
        &self,
        message: &InboundMessage,
        rng: &mut R,
    ) -> DispatchDecision {
        if message.sender_name == self.bot_name {
            return DispatchDecision::NoOp {
                reason: NoOpReason::SelfAuthored,
            };
        }

        for &(keyword, command) in KEYWORD_COMMANDS {
            let mention = parse_mention(&message.text, &self.bot_name, Some(keyword));
            if mention.is_mentioned {
                return self.keyword_decision(command, message, mention.remainder, rng);
            }
        }

        let mention = parse_mention(&message.text, &self.bot_name, None);
        if !mention.is_mentioned {
            if self.unsolicited.should_reply(rng) {
                return DispatchDecision::Unsolicited {
                    prompt: message.text.clone(),
                    params: self.short_params(rng),
                };
            }
            return DispatchDecision::NoOp {
                reason: NoOpReason::UnsolicitedSkipped,
            };
        }

        if message.attachments.is_empty() {
            return DispatchDecision::ShortGeneration {
                prompt: mention.remainder,
                params: self.short_params(rng),
            };
        }

        let image_urls = message.image_urls();
        if image_urls.is_empty() {
            return DispatchDecision::NoOp {
                reason: NoOpReason::NoImageAttachments,
            };
        }

        if parse_mention(&message.text, &self.bot_name, Some(IDENTIFY_KEYWORD)).is_mentioned {
            return DispatchDecision::IdentifyOnly {
                image_urls: image_urls.into_iter().map(str::to_string).collect(),
            };
        }

        let images = image_urls
            .into_iter()
            .map(|url| CaptionTarget {
                url: url.to_string(),
                params: self.short_params(rng),
            })
            .collect();
        DispatchDecision::CaptionedReply {
            remainder: mention.remainder,
            images,
        }
    }

    fn keyword_decision<R: Rng + ?Sized>(
        &self,
        command: KeywordCommand,
        message: &InboundMessage,
        remainder: String,
        rng: &mut R,
    ) -> DispatchDecision {
        match command {
            KeywordCommand::AvatarEcho => DispatchDecision::AvatarEcho {
                avatar_url: message.avatar_url.clone(),
            },
            KeywordCommand::StaticImage => DispatchDecision::StaticImage {
                url: self.assets.random_image_url(rng).to_string(),
            },
            KeywordCommand::Storytime => DispatchDecision::LongForm {
                prompt: remainder,
                params: GenerationParams {
                    length: self.settings.storytime_length,
                    temperature: self.settings.storytime_temperature,
                    keep_whole: true,
                },
            },
        }
    }

    pub fn short_params<R: Rng + ?Sized>(&self, rng: &mut R) -> GenerationParams {
        let s = &self.settings;
        let (len_lo, len_hi) = ordered(s.short_length_min, s.short_length_max);
        let (temp_lo, temp_hi) = ordered(
            s.short_temperature_min_percent,
            s.short_temperature_max_percent,
        );
        let percent: u32 = rng.random_range(temp_lo..=temp_hi);
        GenerationParams {
            length: rng.random_range(len_lo..=len_hi),
            temperature: percent as f32 / 100.0,
            keep_whole: false,
        }
    }
}

fn ordered(a: u32, b: u32) -> (u32, u32) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

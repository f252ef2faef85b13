//! Translation and speech synthesis behind a small trait so command handlers
//! do not depend on a particular provider.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum SpeechError {
    #[error("{0} backend is not configured")]
    NotConfigured(&'static str),
    #[error("speech backend request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("speech backend answered with status {0}")]
    Rejected(u16),
    #[error("speech backend returned no audio")]
    EmptyAudio,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
pub struct Translated {
    #[serde(rename = "translated_text")]
    pub text: String,
    pub source_language: String,
}

#[async_trait]
pub trait SpeechBackend: Send + Sync {
    async fn translate(&self, text: &str, target_lang: &str) -> Result<Translated, SpeechError>;

    /// Synthesize `text` and return MP3 bytes.
    async fn synthesize(&self, text: &str, lang: &str) -> Result<Vec<u8>, SpeechError>;
}

/// JSON-over-HTTP backend.
///
/// `POST {translate_url}` with `{"text", "target"}` answers
/// `{"translated_text", "source_language"}`; `POST {tts_url}` with
/// `{"text", "lang"}` answers MP3 bytes.
pub struct HttpSpeechBackend {
    client: reqwest::Client,
    translate_url: Option<String>,
    tts_url: Option<String>,
}

impl HttpSpeechBackend {
    pub fn new(translate_url: Option<String>, tts_url: Option<String>) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .unwrap_or_default(),
            translate_url,
            tts_url,
        }
    }
}

#[async_trait]
impl SpeechBackend for HttpSpeechBackend {
    async fn translate(&self, text: &str, target_lang: &str) -> Result<Translated, SpeechError> {
        let url = self
            .translate_url
            .as_deref()
            .ok_or(SpeechError::NotConfigured("translation"))?;

        let body = serde_json::json!({ "text": text, "target": target_lang });
        let response = self.client.post(url).json(&body).send().await?;
        if !response.status().is_success() {
            return Err(SpeechError::Rejected(response.status().as_u16()));
        }

        Ok(response.json::<Translated>().await?)
    }

    async fn synthesize(&self, text: &str, lang: &str) -> Result<Vec<u8>, SpeechError> {
        let url = self
            .tts_url
            .as_deref()
            .ok_or(SpeechError::NotConfigured("text-to-speech"))?;

        let body = serde_json::json!({ "text": text, "lang": lang });
        let response = self.client.post(url).json(&body).send().await?;
        if !response.status().is_success() {
            return Err(SpeechError::Rejected(response.status().as_u16()));
        }

        let audio = response.bytes().await?;
        if audio.is_empty() {
            return Err(SpeechError::EmptyAudio);
        }

        Ok(audio.to_vec())
    }
}

/// Language codes accepted by `tool trans`, with display names.
pub const LANGUAGES: &[(&str, &str)] = &[
    ("af", "afrikaans"),
    ("sq", "albanian"),
    ("am", "amharic"),
    ("ar", "arabic"),
    ("hy", "armenian"),
    ("az", "azerbaijani"),
    ("eu", "basque"),
    ("be", "belarusian"),
    ("bn", "bengali"),
    ("bs", "bosnian"),
    ("bg", "bulgarian"),
    ("ca", "catalan"),
    ("ceb", "cebuano"),
    ("ny", "chichewa"),
    ("zh-cn", "chinese (simplified)"),
    ("zh-tw", "chinese (traditional)"),
    ("co", "corsican"),
    ("hr", "croatian"),
    ("cs", "czech"),
    ("da", "danish"),
    ("nl", "dutch"),
    ("en", "english"),
    ("eo", "esperanto"),
    ("et", "estonian"),
    ("tl", "filipino"),
    ("fi", "finnish"),
    ("fr", "french"),
    ("fy", "frisian"),
    ("gl", "galician"),
    ("ka", "georgian"),
    ("de", "german"),
    ("el", "greek"),
    ("gu", "gujarati"),
    ("ht", "haitian creole"),
    ("ha", "hausa"),
    ("haw", "hawaiian"),
    ("iw", "hebrew"),
    ("he", "hebrew"),
    ("hi", "hindi"),
    ("hmn", "hmong"),
    ("hu", "hungarian"),
    ("is", "icelandic"),
    ("ig", "igbo"),
    ("id", "indonesian"),
    ("ga", "irish"),
    ("it", "italian"),
    ("ja", "japanese"),
    ("jw", "javanese"),
    ("kn", "kannada"),
    ("kk", "kazakh"),
    ("km", "khmer"),
    ("ko", "korean"),
    ("ku", "kurdish (kurmanji)"),
    ("ky", "kyrgyz"),
    ("lo", "lao"),
    ("la", "latin"),
    ("lv", "latvian"),
    ("lt", "lithuanian"),
    ("lb", "luxembourgish"),
    ("mk", "macedonian"),
    ("mg", "malagasy"),
    ("ms", "malay"),
    ("ml", "malayalam"),
    ("mt", "maltese"),
    ("mi", "maori"),
    ("mr", "marathi"),
    ("mn", "mongolian"),
    ("my", "myanmar (burmese)"),
    ("ne", "nepali"),
    ("no", "norwegian"),
    ("or", "odia"),
    ("ps", "pashto"),
    ("fa", "persian"),
    ("pl", "polish"),
    ("pt", "portuguese"),
    ("pa", "punjabi"),
    ("ro", "romanian"),
    ("ru", "russian"),
    ("sm", "samoan"),
    ("gd", "scots gaelic"),
    ("sr", "serbian"),
    ("st", "sesotho"),
    ("sn", "shona"),
    ("sd", "sindhi"),
    ("si", "sinhala"),
    ("sk", "slovak"),
    ("sl", "slovenian"),
    ("so", "somali"),
    ("es", "spanish"),
    ("su", "sundanese"),
    ("sw", "swahili"),
    ("sv", "swedish"),
    ("tg", "tajik"),
    ("ta", "tamil"),
    ("te", "telugu"),
    ("th", "thai"),
    ("tr", "turkish"),
    ("uk", "ukrainian"),
    ("ur", "urdu"),
    ("ug", "uyghur"),
    ("uz", "uzbek"),
    ("vi", "vietnamese"),
    ("cy", "welsh"),
    ("xh", "xhosa"),
    ("yi", "yiddish"),
    ("yo", "yoruba"),
    ("zu", "zulu"),
];

/// Whether `code` is a supported translation target (case-insensitive).
pub fn is_supported_language(code: &str) -> bool {
    LANGUAGES
        .iter()
        .any(|(known, _)| known.eq_ignore_ascii_case(code))
}

//! `tool trans`, `tool tts`, `tool ttskh` and `tool ttscn`.

use std::{
    path::{Path, PathBuf},
    process::Stdio,
    time::Duration,
};

use anyhow::{Context as _, bail};
use chrono::Utc;
use tokio::{fs, process::Command, time::timeout};
use tracing::{error, warn};
use twilight_model::{gateway::payload::incoming::MessageCreate, http::attachment::Attachment};

use tipbot_core::{Context, speech::is_supported_language};
use tipbot_database::tts_log::{TtsRecord, Translation, record_translation, record_tts};
use tipbot_utils::{
    parse::split_first_word,
    reactions::{
        EMOJI_ERROR, EMOJI_INFORMATION, EMOJI_OK_BOX, EMOJI_OK_HAND, EMOJI_ZIPPED_MOUTH,
        add_reaction,
    },
    script::{is_chinese, is_english, is_khmer},
};

use super::reply_to;
use crate::author_mentions;

const FFMPEG_TIMEOUT: Duration = Duration::from_secs(20);

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) enum Voice {
    English,
    Khmer,
    Chinese,
}

impl Voice {
    fn lang(self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Khmer => "km",
            Self::Chinese => "zh-CN",
        }
    }
}

/// What to do with the text before synthesizing it.
#[derive(Debug, Eq, PartialEq)]
enum ScriptCheck {
    Accept,
    /// Continue, but tell the user first.
    Warn(&'static str),
    Reject(&'static str),
}

fn check_script(voice: Voice, text: &str) -> ScriptCheck {
    match voice {
        Voice::English if !is_english(text) => {
            ScriptCheck::Reject("Currently, TTS supports English only.")
        }
        Voice::Khmer if !is_khmer(text) => {
            ScriptCheck::Warn("Some characters are not fully in Khmer.")
        }
        Voice::Chinese if !is_chinese(text) => {
            ScriptCheck::Warn("Some characters are not fully in Chinese.")
        }
        _ => ScriptCheck::Accept,
    }
}

/// `20240131-0915_<uuid>`, unique per generated media file.
fn media_stem() -> String {
    format!("{}{}", Utc::now().format("%Y%m%d-%H%M_"), uuid::Uuid::new_v4())
}

async fn save_media(dir: &Path, file_name: &str, bytes: &[u8]) -> anyhow::Result<PathBuf> {
    fs::create_dir_all(dir)
        .await
        .with_context(|| format!("failed to create {}", dir.display()))?;

    let path = dir.join(file_name);
    fs::write(&path, bytes)
        .await
        .with_context(|| format!("failed to write {}", path.display()))?;

    Ok(path)
}

/// Remove a generated media file; a file that is already gone is fine.
async fn discard_media(path: &Path) {
    match fs::remove_file(path).await {
        Ok(()) => {}
        Err(source) if source.kind() == std::io::ErrorKind::NotFound => {}
        Err(source) => warn!(?source, path = %path.display(), "failed to remove media file"),
    }
}

/// ffmpeg arguments rendering an audio file as a waveform video.
fn waveform_args(input: &Path, output: &Path) -> Vec<String> {
    vec![
        "-y".to_owned(),
        "-loglevel".to_owned(),
        "error".to_owned(),
        "-i".to_owned(),
        input.display().to_string(),
        "-filter_complex".to_owned(),
        "[0:a]showwaves=s=640x360:mode=cline:r=30,colorkey=0x000000:0.01:0.1,format=yuv420p[vid]"
            .to_owned(),
        "-map".to_owned(),
        "[vid]".to_owned(),
        "-map".to_owned(),
        "0:a".to_owned(),
        "-codec:v".to_owned(),
        "libx264".to_owned(),
        "-crf".to_owned(),
        "18".to_owned(),
        "-c:a".to_owned(),
        "copy".to_owned(),
        output.display().to_string(),
    ]
}

async fn render_waveform(input: &Path, output: &Path) -> anyhow::Result<()> {
    let mut child = Command::new("ffmpeg")
        .args(waveform_args(input, output))
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .kill_on_drop(true)
        .spawn()
        .context("failed to start ffmpeg")?;

    let status = timeout(FFMPEG_TIMEOUT, child.wait())
        .await
        .context("ffmpeg timed out")??;
    if !status.success() {
        bail!("ffmpeg exited with {status}");
    }

    Ok(())
}

async fn send_media(
    ctx: &Context,
    msg: &MessageCreate,
    file_name: &str,
    bytes: Vec<u8>,
    content: &str,
) -> anyhow::Result<()> {
    let http = &ctx.http;
    let attachment = Attachment::from_bytes(file_name.to_owned(), bytes, 1);
    let mentions = author_mentions(msg.author.id);

    let sent = http
        .create_message(msg.channel_id)
        .content(content)
        .allowed_mentions(Some(&mentions))
        .attachments(&[attachment])
        .reply(msg.id)
        .await?
        .model()
        .await?;

    add_reaction(http, msg.channel_id, sent.id, EMOJI_OK_BOX).await;
    add_reaction(http, msg.channel_id, msg.id, EMOJI_OK_HAND).await;

    Ok(())
}

pub(super) async fn translate(ctx: &Context, msg: &MessageCreate, rest: &str) -> anyhow::Result<()> {
    let (lang, text) = split_first_word(rest);
    let lang = lang.unwrap_or("").to_ascii_lowercase();
    let mention = format!("<@{}>", msg.author.id);

    if lang == "help" || !is_supported_language(&lang) || text.is_empty() {
        add_reaction(&ctx.http, msg.channel_id, msg.id, EMOJI_INFORMATION).await;
        let out = format!(
            "{mention} Supported language code: {}",
            ctx.settings.language_codes_url
        );
        return reply_to(ctx, msg, &out).await;
    }

    if let Err(source) = ctx.http.create_typing_trigger(msg.channel_id).await {
        warn!(?source, "failed to trigger typing");
    }

    if let Err(source) = translate_and_send(ctx, msg, &lang, text).await {
        error!(?source, lang = %lang, "translation failed");
        let out = format!(
            "{mention} Translate: Internal error. The media file could be too big to upload here. Please reduce your text length."
        );
        reply_to(ctx, msg, &out).await?;
    }

    Ok(())
}

async fn translate_and_send(
    ctx: &Context,
    msg: &MessageCreate,
    lang: &str,
    text: &str,
) -> anyhow::Result<()> {
    let translated = ctx.speech.translate(text, lang).await?;
    let audio = ctx.speech.synthesize(&translated.text, lang).await?;

    let dir = &ctx.settings.tts_saved_path;
    let stem = media_stem();
    let audio_path = save_media(dir, &format!("{stem}.mp3"), &audio).await?;
    let video_name = format!("{stem}.mp4");
    let video_path = dir.join(&video_name);

    let rendered = render_waveform(&audio_path, &video_path).await;
    discard_media(&audio_path).await;

    let sent = match rendered {
        Ok(()) => {
            let content = format!("<@{}>: {}", msg.author.id, translated.text);
            match fs::read(&video_path).await {
                Ok(video) => send_media(ctx, msg, &video_name, video, &content).await,
                Err(source) => Err(source.into()),
            }
        }
        Err(source) => Err(source),
    };
    discard_media(&video_path).await;
    sent?;

    let record = TtsRecord {
        user_id: msg.author.id.get(),
        user_name: &msg.author.name,
        original_text: text,
        lang,
        media_file: &video_name,
        bot_server: &ctx.settings.bot_server,
    };
    let translation = Translation {
        translated_text: &translated.text,
        source_lang: &translated.source_language,
    };
    if let Err(source) = record_translation(&ctx.db, &record, &translation).await {
        error!(?source, "failed to record translation");
    }

    Ok(())
}

pub(super) async fn tts(
    ctx: &Context,
    msg: &MessageCreate,
    text: &str,
    voice: Voice,
) -> anyhow::Result<()> {
    let mention = format!("<@{}>", msg.author.id);

    match check_script(voice, text) {
        ScriptCheck::Accept => {}
        ScriptCheck::Warn(note) => {
            add_reaction(&ctx.http, msg.channel_id, msg.id, EMOJI_INFORMATION).await;
            reply_to(ctx, msg, &format!("{mention} {note}")).await?;
        }
        ScriptCheck::Reject(reason) => {
            add_reaction(&ctx.http, msg.channel_id, msg.id, EMOJI_ERROR).await;
            return reply_to(ctx, msg, &format!("{mention} {reason}")).await;
        }
    }

    if let Err(source) = ctx.http.create_typing_trigger(msg.channel_id).await {
        warn!(?source, "failed to trigger typing");
    }

    if let Err(source) = speak_and_send(ctx, msg, text, voice).await {
        error!(?source, lang = voice.lang(), "text to speech failed");
        add_reaction(&ctx.http, msg.channel_id, msg.id, EMOJI_ZIPPED_MOUTH).await;
    }

    Ok(())
}

async fn speak_and_send(
    ctx: &Context,
    msg: &MessageCreate,
    text: &str,
    voice: Voice,
) -> anyhow::Result<()> {
    let audio = ctx.speech.synthesize(text, voice.lang()).await?;

    let file_name = format!("{}.mp3", media_stem());
    let content = format!("<@{}>", msg.author.id);
    send_media(ctx, msg, &file_name, audio, &content).await?;

    let record = TtsRecord {
        user_id: msg.author.id.get(),
        user_name: &msg.author.name,
        original_text: text,
        lang: voice.lang(),
        media_file: &file_name,
        bot_server: &ctx.settings.bot_server,
    };
    if let Err(source) = record_tts(&ctx.db, &record).await {
        error!(?source, "failed to record tts");
    }

    Ok(())
}

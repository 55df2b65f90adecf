use crate::error::Result;
use crate::sampler::sample_line;
use crate::sidecar::TextGenerator;
use crate::types::GenerationParams;
use rand::Rng;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

pub const QUIT_COMMAND: &str = "qq";
pub const CHAT_TEMPERATURE: f32 = 0.7;
pub const LONG_LENGTH: u32 = 500;
pub const LONG_SAMPLES: usize = 10;

/// Output length grows with the prompt: three tokens per prompt character.
pub fn chat_params(prompt: &str) -> GenerationParams {
    let length = (prompt.chars().count() as u32).saturating_mul(3).clamp(1, 1024);
    GenerationParams {
        length,
        temperature: CHAT_TEMPERATURE,
        keep_whole: false,
    }
}

/// Reads prompts line by line until EOF or `qq`, answering each with one
/// sampled line of generated text.
pub async fn run_chat<G, I, O, R>(
    generator: &G,
    input: I,
    mut output: O,
    rng: &mut R,
) -> Result<()>
where
    G: TextGenerator + ?Sized,
    I: AsyncBufRead + Unpin,
    O: AsyncWrite + Unpin,
    R: Rng + ?Sized,
{
    let mut lines = input.lines();
    loop {
        write_out(&mut output, "You:        ").await?;
        let Some(prompt) = lines.next_line().await? else {
            break;
        };
        let prompt = prompt.trim_end().to_string();
        if prompt == QUIT_COMMAND {
            break;
        }

        let params = chat_params(&prompt);
        let raw = generator.generate(&prompt, &params).await?;
        let reply = sample_line(&raw, false, rng);
        write_out(&mut output, &format!("Computer:   {reply}\n")).await?;
    }
    Ok(())
}

pub fn long_params() -> GenerationParams {
    GenerationParams {
        length: LONG_LENGTH,
        temperature: CHAT_TEMPERATURE,
        keep_whole: true,
    }
}

pub async fn run_long<G, O>(generator: &G, samples: usize, mut output: O) -> Result<()>
where
    G: TextGenerator + ?Sized,
    O: AsyncWrite + Unpin,
{
    write_out(&mut output, "*loading*\r").await?;
    let params = long_params();
    for _ in 0..samples {
        let text = generator.generate("", &params).await?;
        if text.ends_with('\n') {
            write_out(&mut output, &text).await?;
        } else {
            write_out(&mut output, &format!("{text}\n")).await?;
        }
    }
    Ok(())
}

async fn write_out<O: AsyncWrite + Unpin>(output: &mut O, text: &str) -> Result<()> {
    output.write_all(text.as_bytes()).await?;
    output.flush().await?;
    Ok(())
}

use rand::Rng;

/// Picks what to post from a raw generation blob.
///
/// With `keep_whole` the blob comes back line-for-line. Otherwise one line is
/// drawn from `[1, len - 2]`, skipping the echoed prompt and the usually
/// truncated last line. Fewer than three lines falls back to the first.
pub fn sample_line<R: Rng + ?Sized>(generated: &str, keep_whole: bool, rng: &mut R) -> String {
    let lines: Vec<&str> = generated.split('\n').collect();
    if keep_whole {
        return lines.join("\n");
    }
    if lines.len() < 3 {
        return lines[0].to_string();
    }
    let index = rng.random_range(1..=lines.len() - 2);
    lines[index].to_string()
}

#[derive(Debug, Clone, Copy)]
pub struct UnsolicitedSampler {
    chance_percent: u32,
}

impl UnsolicitedSampler {
    pub fn new(chance_percent: u32) -> Self {
        Self {
            chance_percent: chance_percent.min(100),
        }
    }

    pub fn chance_percent(&self) -> u32 {
        self.chance_percent
    }

    /// Fresh draw from `[1, 100]`; fires when the draw is at most the chance.
    pub fn should_reply<R: Rng + ?Sized>(&self, rng: &mut R) -> bool {
        let draw: u32 = rng.random_range(1..=100);
        draw <= self.chance_percent
    }
}

impl Default for UnsolicitedSampler {
    fn default() -> Self {
        Self::new(10)
    }
}

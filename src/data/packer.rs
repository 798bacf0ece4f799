// ============================================================
// Layer 4 — Prompt Packer
// ============================================================
// Greedily packs consecutive segments of one video into prompts
// whose rendered size stays within `max_prompt_length`.
//
// How packing works:
//   - Start a run at the cursor with one segment.
//   - Try extending the run by the next segment (lookahead),
//     render it, and measure it.
//   - If the extended run is too long, the lookahead segment
//     starts the next run instead. Otherwise keep it and repeat.
//   - A run that holds a single segment is emitted even when it
//     alone is over budget; segments are never split.
//
// Example with a budget that fits two segments:
//   segments: [t=0] [t=5] [t=12]
//   run 1:    [t=0] [t=5]          (adding t=12 overflows)
//   run 2:    [t=12]
//
// The packer never copies or reorders segments. It is an
// iterator over an index cursor into the borrowed slice, so runs
// partition the slice into contiguous, non-overlapping pieces.
//
// Reference: Rust Book §13 (Iterators)
//            Rust Book §8 (Slices)

use std::path::Path;

use serde_json::{Map, Value};

use crate::data::renderer::{to_pretty_json, Renderer};
use crate::domain::config::PrepConfig;
use crate::domain::error::{PrepError, PrepResult};
use crate::domain::prompt::Prompt;
use crate::domain::segment::{Segment, SegmentInput};

/// One finished run: the segments it covers plus its encodings.
#[derive(Debug, Clone)]
pub struct PackedRun<'a> {
    /// The contiguous segments in this prompt
    pub segments: &'a [Segment],

    /// Index of the first segment within the packed slice
    pub offset: usize,

    /// JSON array of the segments, without titles
    pub json_input: String,

    /// JSON object mapping start_time → title
    pub json_output: String,

    /// The rendered prompt
    pub prompt: Prompt,
}

/// Lazy iterator over the runs of one video's segments.
///
/// Yields `Err` once and then stops if a segment has no title;
/// a video with an unlabelled segment cannot be packed at all.
pub struct Packer<'a> {
    segments: &'a [Segment],
    renderer: &'a Renderer,
    max_len:  usize,
    source:   &'a Path,
    cursor:   usize,
    failed:   bool,
}

impl<'a> Packer<'a> {
    /// `source` identifies the video in error messages
    pub fn new(
        segments: &'a [Segment],
        renderer: &'a Renderer,
        config:   &PrepConfig,
        source:   &'a Path,
    ) -> Self {
        Self {
            segments,
            renderer,
            max_len: config.max_prompt_length,
            source,
            cursor: 0,
            failed: false,
        }
    }

    /// Encode and render segments[start..end]
    fn build(&self, start: usize, end: usize) -> PrepResult<PackedRun<'a>> {
        let segments    = self.segments;
        let run         = &segments[start..end];
        let json_output = encode_output(run, self.source)?;
        let json_input  = encode_input(run)?;
        let prompt      = self.renderer.render(&json_input, &json_output);

        Ok(PackedRun {
            segments: run,
            offset: start,
            json_input,
            json_output,
            prompt,
        })
    }

    fn next_run(&mut self) -> PrepResult<PackedRun<'a>> {
        let start    = self.cursor;
        let mut end  = start + 1;
        let mut best = self.build(start, end)?;

        while end < self.segments.len() {
            let candidate = self.build(start, end + 1)?;

            // Candidate always holds at least two segments here
            if self.renderer.length(&candidate.prompt) > self.max_len {
                break;
            }

            best = candidate;
            end += 1;
        }

        self.cursor = end;
        Ok(best)
    }
}

impl<'a> Iterator for Packer<'a> {
    type Item = PrepResult<PackedRun<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.cursor >= self.segments.len() {
            return None;
        }

        match self.next_run() {
            Ok(run) => Some(Ok(run)),
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}

/// `json_input`: the run as a JSON array, titles left out
pub fn encode_input(run: &[Segment]) -> PrepResult<String> {
    let inputs: Vec<SegmentInput<'_>> = run.iter().map(Segment::as_input).collect();
    Ok(to_pretty_json(&inputs)?)
}

/// `json_output`: start_time → title, in run order.
///
/// Several segments sharing a title is how the model marks them
/// as one chapter. A repeated start_time keeps its first position
/// and takes the later title.
pub fn encode_output(run: &[Segment], source: &Path) -> PrepResult<String> {
    let mut titles = Map::new();

    for seg in run {
        let title = seg.title.as_ref().ok_or_else(|| PrepError::MissingTitle {
            file:       source.to_path_buf(),
            start_time: seg.start_key(),
        })?;
        titles.insert(seg.start_key(), Value::String(title.clone()));
    }

    Ok(to_pretty_json(&titles)?)
}

// ============================================================
// Layer 4 — Sliding-Window Expansion
// ============================================================
// Re-runs the packer from successive offsets into a video's
// segments so the same material is grouped at different run
// boundaries. This gives the model more varied examples from a
// limited number of lectures.
//
// Example with 7 segments and sliding_step = 2:
//   offsets:  0, 2, 4          (stop = 7 - 2 = 5, exclusive)
//   offset 0: pack [s0 .. s6]
//   offset 2: pack [s2 .. s6]
//   offset 4: pack [s4 .. s6]
//
// The stop bound is `len - step`, floored at 1 so short videos
// still get one pass from offset 0. When `len - step` is not a
// multiple of `step` the last suffix that would fit is skipped;
// that boundary is kept deliberately.
//
// A prompt produced at a later offset is dropped when an equal
// prompt already came out of an earlier offset of the same
// video. Duplicates inside one pass are kept.
//
// Reference: Rust Book §13 (Iterators)
//            std::iter::StepBy

use std::collections::HashSet;
use std::path::Path;

use crate::data::packer::Packer;
use crate::data::renderer::Renderer;
use crate::domain::config::PrepConfig;
use crate::domain::error::PrepResult;
use crate::domain::prompt::Prompt;
use crate::domain::segment::Segment;

/// Start offsets for a video of `len` segments
pub fn window_offsets(len: usize, step: usize) -> impl Iterator<Item = usize> {
    let step = step.max(1);
    let stop = len.saturating_sub(step).max(1);
    (0..stop).step_by(step)
}

/// All prompts for one video, with or without sliding windows.
pub fn expand_video(
    segments: &[Segment],
    renderer: &Renderer,
    config:   &PrepConfig,
    source:   &Path,
) -> PrepResult<Vec<Prompt>> {
    let Some(step) = config.sliding_step else {
        return pack_from(segments, 0, renderer, config, source);
    };

    let mut prompts = Vec::new();
    let mut seen: HashSet<Prompt> = HashSet::new();

    for offset in window_offsets(segments.len(), step) {
        let pass = pack_from(segments, offset, renderer, config, source)?;

        let fresh: Vec<Prompt> = pass
            .iter()
            .filter(|p| !seen.contains(*p))
            .cloned()
            .collect();

        tracing::debug!(
            "{}: offset {} gave {} prompts ({} new)",
            source.display(),
            offset,
            pass.len(),
            fresh.len(),
        );

        seen.extend(pass);
        prompts.extend(fresh);
    }

    Ok(prompts)
}

fn pack_from(
    segments: &[Segment],
    offset:   usize,
    renderer: &Renderer,
    config:   &PrepConfig,
    source:   &Path,
) -> PrepResult<Vec<Prompt>> {
    Packer::new(&segments[offset..], renderer, config, source)
        .map(|run| {
            run.map(|r| {
                tracing::trace!(
                    "{}: run at {} covers {} segments ({} input / {} output chars)",
                    source.display(),
                    offset + r.offset,
                    r.segments.len(),
                    r.json_input.chars().count(),
                    r.json_output.chars().count(),
                );
                r.prompt
            })
        })
        .collect()
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::renderer::PromptTemplate;
    use crate::domain::config::tests::sample_config;
    use crate::domain::error::PrepError;
    use crate::domain::prompt::OutputFormat;

    fn renderer() -> Renderer {
        Renderer::new(
            PromptTemplate::parse("{json_input}{json_output}").unwrap(),
            OutputFormat::Full,
        )
        .unwrap()
    }

    fn segments(n: u64) -> Vec<Segment> {
        (0..n)
            .map(|i| Segment::new(i * 10, format!("t{i}"), "", Some("T")))
            .collect()
    }

    #[test]
    fn test_offsets_follow_step() {
        let v: Vec<usize> = window_offsets(10, 2).collect();
        assert_eq!(v, vec![0, 2, 4, 6]);
    }

    #[test]
    fn test_uneven_length_skips_final_window() {
        // 7 - 2 = 5 → offsets 0, 2, 4 (offset 6 is never packed)
        let v: Vec<usize> = window_offsets(7, 2).collect();
        assert_eq!(v, vec![0, 2, 4]);
    }

    #[test]
    fn test_short_video_still_gets_one_pass() {
        assert_eq!(window_offsets(1, 5).collect::<Vec<_>>(), vec![0]);
        assert_eq!(window_offsets(3, 3).collect::<Vec<_>>(), vec![0]);
        assert_eq!(window_offsets(0, 1).collect::<Vec<_>>(), vec![0]);
    }

    #[test]
    fn test_without_step_packs_once() {
        let segs = segments(5);
        let cfg  = sample_config();
        let out  = expand_video(&segs, &renderer(), &cfg, Path::new("v")).unwrap();
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn test_sliding_produces_suffix_prompts() {
        // Large budget: every pass is a single prompt of its suffix
        let segs = segments(6);
        let mut cfg = sample_config();
        cfg.max_prompt_length = 100_000;
        cfg.sliding_step = Some(2);

        let out = expand_video(&segs, &renderer(), &cfg, Path::new("v")).unwrap();
        // offsets 0, 2 → two distinct prompts
        assert_eq!(out.len(), 2);
        assert_ne!(out[0], out[1]);
    }

    #[test]
    fn test_overlapping_windows_are_deduplicated() {
        // Budget fits exactly one segment, so each pass yields one
        // prompt per segment and later offsets only repeat earlier ones.
        let segs = segments(6);
        let mut cfg = sample_config();
        cfg.max_prompt_length = 1;
        cfg.sliding_step = Some(1);

        let out = expand_video(&segs, &renderer(), &cfg, Path::new("v")).unwrap();
        assert_eq!(out.len(), 6);
        let unique: HashSet<&Prompt> = out.iter().collect();
        assert_eq!(unique.len(), 6);
    }

    #[test]
    fn test_missing_title_aborts_video() {
        let mut segs = segments(4);
        segs[3].title = None;
        let mut cfg = sample_config();
        cfg.sliding_step = Some(1);

        let err = expand_video(&segs, &renderer(), &cfg, Path::new("bad.json")).unwrap_err();
        assert!(matches!(err, PrepError::MissingTitle { .. }));
    }
}

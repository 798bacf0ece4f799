// ============================================================
// Layer 4 — Corpus Builder
// ============================================================
// Walks every video a SegmentSource knows about, packs each one
// (with sliding windows when configured), and gathers all the
// prompts into a single in-memory corpus.
//
// Videos are processed one at a time, start to finish. The
// whole corpus stays in memory until it is split and written,
// which bounds how large a corpus one run can handle.
//
// A failing video fails the build; the error already names the
// file, so no partial corpus is ever returned.
//
// Reference: Rust Book §13 (Iterators and Closures)

use crate::data::renderer::Renderer;
use crate::data::window::expand_video;
use crate::domain::config::PrepConfig;
use crate::domain::error::PrepResult;
use crate::domain::prompt::Prompt;
use crate::domain::traits::SegmentSource;

pub struct CorpusBuilder<'a, S: SegmentSource> {
    source:   &'a S,
    renderer: &'a Renderer,
    config:   &'a PrepConfig,
}

impl<'a, S: SegmentSource> CorpusBuilder<'a, S> {
    pub fn new(source: &'a S, renderer: &'a Renderer, config: &'a PrepConfig) -> Self {
        Self { source, renderer, config }
    }

    /// Prompts from all videos, in video order then generation order
    pub fn build(&self) -> PrepResult<Vec<Prompt>> {
        let mut corpus = Vec::new();

        for video in self.source.videos()? {
            tracing::info!("Processing {}", video.display());

            let segments = self.source.load(&video)?;
            let prompts  = expand_video(&segments, self.renderer, self.config, &video)?;

            tracing::debug!(
                "{}: {} segments → {} prompts",
                video.display(),
                segments.len(),
                prompts.len()
            );
            corpus.extend(prompts);
        }

        tracing::info!("Built corpus of {} prompts", corpus.len());
        Ok(corpus)
    }
}

//! Link driver: assembles source files in order into one program image.
//!
//! Files share a single [`Session`], so a file sees the labels of every file
//! before it. An I/O error stops the run at once; assembly and encoding
//! errors reject the offending file and the remaining files are still
//! attempted so that all problems are reported. Any error makes the whole link fail.

use std::io;
use std::path::Path;

use friday_bytecode::{Program, Registry};

use crate::assembler::assemble_file;
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::session::Session;
use crate::source::{EncodingError, SourceFile, SourceMap};

/// Diagnostics of a link together with the sources they point into.
#[derive(Debug, Clone, Default)]
pub struct Report {
    pub diagnostics: Diagnostics,
    pub sources: SourceMap,
}

impl Report {
    /// Render every diagnostic, with source excerpts.
    pub fn render(&self, colored: bool) -> String {
        self.diagnostics
            .printer()
            .sources(&self.sources)
            .colored(colored)
            .render()
    }
}

/// A successful link. The report may still carry warnings.
#[derive(Debug)]
pub struct Linked {
    pub program: Program,
    pub report: Report,
}

#[derive(Debug, thiserror::Error)]
pub enum LinkError {
    #[error("cannot read `{path}`: {source}")]
    Io {
        path: String,
        source: io::Error,
        report: Report,
    },

    #[error("assembly failed with {} errors", .report.diagnostics.error_count())]
    Failed { report: Report },
}

impl LinkError {
    /// Diagnostics collected before the link stopped.
    pub fn report(&self) -> &Report {
        match self {
            LinkError::Io { report, .. } | LinkError::Failed { report } => report,
        }
    }
}

pub struct Linker<'r> {
    registry: &'r Registry,
}

impl<'r> Linker<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self { registry }
    }

    /// Read and assemble `paths` in order. Each file is read right before
    /// it is assembled.
    pub fn link_paths<P: AsRef<Path>>(&self, paths: &[P]) -> Result<Linked, LinkError> {
        let mut run = Run::new(self.registry);
        for path in paths {
            let path = path.as_ref();
            let name = path.display().to_string();
            let bytes = match std::fs::read(path) {
                Ok(bytes) => bytes,
                Err(source) => {
                    return Err(LinkError::Io {
                        path: name,
                        source,
                        report: run.report,
                    });
                }
            };
            match SourceFile::from_bytes(name, bytes) {
                Ok(file) => run.assemble(file),
                Err(err) => run.reject(err),
            }
        }
        run.finish()
    }

    /// Assemble in-memory sources in order.
    pub fn link_sources(
        &self,
        files: impl IntoIterator<Item = SourceFile>,
    ) -> Result<Linked, LinkError> {
        let mut run = Run::new(self.registry);
        for file in files {
            run.assemble(file);
        }
        run.finish()
    }
}

/// Assemble `files` with `registry`.
pub fn assemble(
    registry: &Registry,
    files: impl IntoIterator<Item = SourceFile>,
) -> Result<Linked, LinkError> {
    Linker::new(registry).link_sources(files)
}

struct Run<'r> {
    session: Session<'r>,
    report: Report,
    failed: bool,
}

impl<'r> Run<'r> {
    fn new(registry: &'r Registry) -> Self {
        Self {
            session: Session::new(registry),
            report: Report::default(),
            failed: false,
        }
    }

    fn assemble(&mut self, file: SourceFile) {
        if !assemble_file(&mut self.session, &file, &mut self.report.diagnostics) {
            self.failed = true;
        }
        self.report.sources.push(file);
    }

    /// A file that cannot be decoded fails the link but not the run.
    fn reject(&mut self, err: EncodingError) {
        self.report
            .diagnostics
            .report(DiagnosticKind::InvalidEncoding, &err.path, err.line, 0..0)
            .message(err.to_string())
            .emit();
        self.failed = true;
    }

    fn finish(self) -> Result<Linked, LinkError> {
        if self.failed {
            return Err(LinkError::Failed {
                report: self.report,
            });
        }
        Ok(Linked {
            program: self.session.finish(),
            report: self.report,
        })
    }
}

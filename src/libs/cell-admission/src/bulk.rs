//! Bulk Load Source
//!
//! Line-oriented admission input: `<gen> <service> <frequency>` per line.
//! Blank lines and lines starting with `#` are comments. Lines for other
//! generations are skipped on load and kept byte-for-byte when the source is
//! rewritten after a removal. The source is held as raw bytes: a line that is
//! not valid UTF-8 is classified on its lossy decoding and rewritten as read.

use crate::allocator::{AddOutcome, SpectrumAllocator};
use crate::profile::{Generation, ServiceType};

/// One admission request from a bulk source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BulkEntry {
    pub generation: Generation,
    pub service: ServiceType,
    pub frequency_mhz: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Blank,
    Comment,
    Entry(BulkEntry),
    Malformed,
}

/// Classify a single line (terminator optional)
pub fn parse_line(line: &str) -> LineKind {
    let text = line.trim();
    if text.is_empty() {
        return LineKind::Blank;
    }
    if text.starts_with('#') {
        return LineKind::Comment;
    }

    let tokens: Vec<&str> = text
        .split_whitespace()
        .take_while(|token| !token.starts_with('#'))
        .collect();
    let [generation, service, frequency] = tokens.as_slice() else {
        return LineKind::Malformed;
    };

    let generation = generation.parse::<u8>().ok().and_then(|c| Generation::from_code(c).ok());
    let service = service.parse::<u8>().ok().and_then(|c| ServiceType::from_code(c).ok());
    let frequency_mhz = frequency.parse::<u32>().ok();

    match (generation, service, frequency_mhz) {
        (Some(generation), Some(service), Some(frequency_mhz)) => LineKind::Entry(BulkEntry {
            generation,
            service,
            frequency_mhz,
        }),
        _ => LineKind::Malformed,
    }
}

/// Entry of the active generation that the allocator refused
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedLine {
    /// 1-based line number in the source
    pub line_no: usize,
    pub outcome: AddOutcome,
}

/// Summary of one bulk load
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BulkLoadReport {
    pub admitted: usize,
    pub rejected: Vec<RejectedLine>,
    pub other_generation: usize,
    /// 1-based line numbers of lines that could not be parsed
    pub malformed: Vec<usize>,
    pub comments: usize,
}

#[derive(Debug, Clone)]
struct SourceLine {
    /// Raw bytes including the line terminator
    raw: Vec<u8>,
    kind: LineKind,
}

impl SourceLine {
    fn new(raw: &[u8]) -> Self {
        Self {
            raw: raw.to_vec(),
            kind: parse_line(&String::from_utf8_lossy(raw)),
        }
    }
}

/// Parsed bulk source, kept verbatim for rewriting
#[derive(Debug, Clone, Default)]
pub struct BulkSource {
    lines: Vec<SourceLine>,
    /// Source line behind each allocator record, by record position.
    /// `None` for records this source did not admit.
    record_lines: Vec<Option<usize>>,
}

impl BulkSource {
    pub fn parse(bytes: impl AsRef<[u8]>) -> Self {
        let lines = bytes
            .as_ref()
            .split_inclusive(|&b| b == b'\n')
            .map(SourceLine::new)
            .collect();
        Self {
            lines,
            record_lines: Vec::new(),
        }
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Entries for `generation` in source order
    pub fn entries(&self, generation: Generation) -> impl Iterator<Item = &BulkEntry> {
        self.lines.iter().filter_map(move |line| match &line.kind {
            LineKind::Entry(entry) if entry.generation == generation => Some(entry),
            _ => None,
        })
    }

    /// Apply every entry of the allocator's generation, in order.
    ///
    /// Bad or refused lines are skipped individually; the rest of the source
    /// is still applied. Line mappings of records admitted by an earlier load
    /// are kept.
    pub fn load_into(&mut self, allocator: &mut SpectrumAllocator) -> BulkLoadReport {
        let generation = allocator.generation();
        let mut report = BulkLoadReport::default();
        self.record_lines.resize(allocator.user_count(), None);

        for (idx, line) in self.lines.iter().enumerate() {
            let line_no = idx + 1;
            match line.kind {
                LineKind::Blank | LineKind::Comment => report.comments += 1,
                LineKind::Malformed => {
                    log::warn!(
                        "Skipping malformed line {line_no}: {:?}",
                        String::from_utf8_lossy(&line.raw).trim_end()
                    );
                    report.malformed.push(line_no);
                }
                LineKind::Entry(entry) if entry.generation != generation => {
                    report.other_generation += 1;
                }
                LineKind::Entry(entry) => {
                    let outcome = allocator.add_user(entry.service, entry.frequency_mhz);
                    if outcome.is_added() {
                        self.record_lines.push(Some(idx));
                        report.admitted += 1;
                    } else {
                        report.rejected.push(RejectedLine { line_no, outcome });
                    }
                }
            }
        }

        log::info!(
            "{generation} bulk load: {} admitted, {} rejected, {} other generation, {} malformed",
            report.admitted,
            report.rejected.len(),
            report.other_generation,
            report.malformed.len()
        );
        report
    }

    /// Remove user `id` from the allocator and drop the line that admitted it.
    ///
    /// Returns false (and changes nothing) when `id` is out of range.
    pub fn remove_user(&mut self, allocator: &mut SpectrumAllocator, id: u32) -> bool {
        if allocator.remove_user(id).is_none() {
            return false;
        }

        let pos = id as usize - 1;
        if pos >= self.record_lines.len() {
            return true;
        }
        if let Some(dropped) = self.record_lines.remove(pos) {
            self.lines.remove(dropped);
            for mapping in &mut self.record_lines {
                match *mapping {
                    // Same line admitted by a repeated load
                    Some(line) if line == dropped => *mapping = None,
                    Some(line) if line > dropped => *mapping = Some(line - 1),
                    _ => {}
                }
            }
            log::info!("Dropped source line {} for user U{id}", dropped + 1);
        }
        true
    }

    /// Current source bytes
    pub fn render(&self) -> Vec<u8> {
        self.lines
            .iter()
            .flat_map(|line| line.raw.iter().copied())
            .collect()
    }
}

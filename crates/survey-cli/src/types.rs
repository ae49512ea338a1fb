use std::path::PathBuf;

/// Outcome of one pipeline run.
#[derive(Debug)]
pub struct RunResult {
    pub data_folder: PathBuf,
    pub output_dir: PathBuf,
    pub stages: Vec<StageSummary>,
    /// Name matches that fell below the acceptance threshold.
    pub low_confidence: usize,
    /// Multi-select answers that violated the serialization contract.
    pub sequence_violations: usize,
    /// Set when the run paused waiting for a curated correction file.
    pub stopped: Option<StopReason>,
}

impl RunResult {
    pub fn new(data_folder: PathBuf, output_dir: PathBuf) -> Self {
        Self {
            data_folder,
            output_dir,
            stages: Vec::new(),
            low_confidence: 0,
            sequence_violations: 0,
            stopped: None,
        }
    }
}

/// Per-stage record for the run summary.
#[derive(Debug)]
pub struct StageSummary {
    pub name: &'static str,
    pub rows_in: usize,
    pub rows_out: usize,
    /// Primary output file, when one was written.
    pub output: Option<PathBuf>,
}

/// Why a run stopped before the final tables were written.
#[derive(Debug)]
pub enum StopReason {
    /// The name-match review file was written; curation is needed before
    /// the merge can run.
    AwaitingMatchReview { correction_file: PathBuf },
    /// The college name/location review file was written; curation is
    /// needed before the final tables can be built.
    AwaitingCollegeReview { correction_file: PathBuf },
}

impl StopReason {
    pub fn correction_file(&self) -> &PathBuf {
        match self {
            StopReason::AwaitingMatchReview { correction_file }
            | StopReason::AwaitingCollegeReview { correction_file } => correction_file,
        }
    }
}

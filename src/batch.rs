//! Batch driver: one profile per party input file.
//!
//! Every file with the configured extension in the input folder is one
//! party; the party name is the file stem. For each party the driver writes
//! `<party>.json` (the profile) and `<domain name>.json` (the shared domain)
//! into the output folder.
//!
//! Read and build failures are local to a party: they are logged, collected
//! in the [`BatchReport`], and the run continues. Both documents are rendered
//! before anything is written, so a party that fails to build leaves no
//! output. A failure while writing aborts the run, since the output folder
//! would fail the same way for every remaining party.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::config::{Config, DomainOutput};
use crate::input::read_statements;
use crate::profile::ProfileBuilder;
use crate::types::{Domain, Profile};
use crate::{Result, StancemapError, telemetry};

/// A party input file found in the input folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartyInput {
    pub party: String,
    pub path: PathBuf,
}

/// Files written for one party.
#[derive(Debug, Clone)]
pub struct PartyOutput {
    pub party: String,
    pub profile_path: PathBuf,
    /// `None` when the domain document was already written this run.
    pub domain_path: Option<PathBuf>,
}

/// A party that could not be processed.
#[derive(Debug)]
pub struct PartyFailure {
    pub party: String,
    pub error: StancemapError,
}

/// Outcome of a batch run.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub written: Vec<PartyOutput>,
    pub failed: Vec<PartyFailure>,
}

impl BatchReport {
    /// True if every party was written.
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Rendered documents for one party, ready to be written.
struct Rendered {
    profile: Profile,
    profile_json: String,
    domain_json: String,
}

/// Runs profile generation over a folder of party input files.
#[derive(Debug, Clone)]
pub struct BatchRunner {
    config: Config,
    builder: ProfileBuilder,
}

impl BatchRunner {
    pub fn new(config: Config) -> Self {
        let builder = ProfileBuilder::from_config(&config);
        Self { config, builder }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// List party input files in `input_dir`, sorted by party name.
    pub fn discover(&self, input_dir: &Path) -> Result<Vec<PartyInput>> {
        let extension = self.config.input.extension.as_str();
        let mut parties = Vec::new();
        for entry in fs::read_dir(input_dir)? {
            let path = entry?.path();
            if !path.is_file() || path.extension().is_none_or(|ext| ext != extension) {
                continue;
            }
            let Some(party) = path.file_stem().and_then(|s| s.to_str()) else {
                warn!(path = %path.display(), "skipping input file with non UTF-8 name");
                continue;
            };
            parties.push(PartyInput {
                party: party.to_owned(),
                path,
            });
        }
        parties.sort_by(|a, b| a.party.cmp(&b.party));
        Ok(parties)
    }

    /// Process every party in `input_dir`, writing into `output_dir`.
    ///
    /// A party that cannot be read or built ends up in the report and the
    /// run continues. Failing to list the input folder, create the output
    /// folder, or write a party's documents aborts the run.
    pub fn run(&self, input_dir: &Path, output_dir: &Path) -> Result<BatchReport> {
        fs::create_dir_all(output_dir)?;
        let parties = self.discover(input_dir)?;
        if parties.is_empty() {
            warn!(
                input = %input_dir.display(),
                extension = %self.config.input.extension,
                "no party input files found"
            );
        }

        let mut report = BatchReport::default();
        let mut shared_domain: Option<Domain> = None;

        for input in parties {
            let rendered = match self.render(&input) {
                Ok(rendered) => rendered,
                Err(e) => {
                    if e.is_data_error() {
                        warn!(party = %input.party, error = %e, "skipping party");
                    } else {
                        error!(party = %input.party, error = %e, "failed to process party");
                    }
                    metrics::counter!(telemetry::PARTIES_TOTAL, "status" => "error").increment(1);
                    report.failed.push(PartyFailure {
                        party: input.party,
                        error: e,
                    });
                    continue;
                }
            };

            let write_domain = match (&self.config.output.domain, &shared_domain) {
                (DomainOutput::PerParty, _) | (DomainOutput::Once, None) => true,
                (DomainOutput::Once, Some(_)) => false,
            };
            let output = self
                .write(&input.party, &rendered, output_dir, write_domain)
                .inspect_err(|e| {
                    error!(party = %input.party, error = %e, "failed to write party output");
                    metrics::counter!(telemetry::PARTIES_TOTAL, "status" => "error").increment(1);
                })?;

            match &shared_domain {
                Some(domain) if domain != rendered.profile.domain() => {
                    warn!(
                        party = %input.party,
                        "party statements differ from the domain already written"
                    );
                }
                Some(_) => {}
                None => shared_domain = Some(rendered.profile.domain().clone()),
            }
            metrics::counter!(telemetry::PARTIES_TOTAL, "status" => "ok").increment(1);
            report.written.push(output);
        }

        info!(
            written = report.written.len(),
            failed = report.failed.len(),
            "batch finished"
        );
        Ok(report)
    }

    fn render(&self, input: &PartyInput) -> Result<Rendered> {
        if input.party == self.builder.domain_name() {
            return Err(StancemapError::PartyNameConflict {
                party: input.party.clone(),
            });
        }
        let statements = read_statements(
            &input.path,
            &self.config.input,
            self.builder.label_set(),
        )?;
        debug!(party = %input.party, statements = statements.len(), "read statements");

        let profile = self.builder.build(&input.party, &statements)?;
        let profile_json = to_document(&profile, self.config.output.pretty)?;
        let domain_json = to_document(profile.domain(), self.config.output.pretty)?;
        Ok(Rendered {
            profile,
            profile_json,
            domain_json,
        })
    }

    /// Stage every document in a temporary file, then rename them all into
    /// place. Nothing is renamed unless every document was staged.
    fn write(
        &self,
        party: &str,
        rendered: &Rendered,
        output_dir: &Path,
        write_domain: bool,
    ) -> Result<PartyOutput> {
        let profile_path = output_dir.join(format!("{party}.json"));
        let domain_path = write_domain
            .then(|| output_dir.join(format!("{}.json", self.builder.domain_name())));

        let mut documents = vec![(profile_path.as_path(), rendered.profile_json.as_str())];
        if let Some(path) = &domain_path {
            documents.push((path.as_path(), rendered.domain_json.as_str()));
        }

        let mut staged: Vec<(PathBuf, &Path)> = Vec::with_capacity(documents.len());
        for (path, contents) in documents {
            let tmp_path = path.with_extension("json.tmp");
            if let Err(e) = fs::write(&tmp_path, contents) {
                discard(&staged);
                return Err(e.into());
            }
            staged.push((tmp_path, path));
        }
        for (i, (tmp_path, path)) in staged.iter().enumerate() {
            if let Err(e) = fs::rename(tmp_path, path) {
                for (_, renamed) in &staged[..i] {
                    let _ = fs::remove_file(renamed);
                }
                discard(&staged[i..]);
                return Err(e.into());
            }
        }

        info!(party, path = %profile_path.display(), "wrote profile");
        if let Some(path) = &domain_path {
            debug!(path = %path.display(), "wrote domain");
        }
        Ok(PartyOutput {
            party: party.to_owned(),
            profile_path,
            domain_path,
        })
    }
}

/// Serialize a document as JSON with a trailing newline.
pub fn to_document<T: Serialize + ?Sized>(value: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(format!("{json}\n"))
}

/// Best-effort removal of staged temporary files.
fn discard(staged: &[(PathBuf, &Path)]) {
    for (tmp_path, _) in staged {
        if let Err(e) = fs::remove_file(tmp_path) {
            warn!(path = %tmp_path.display(), error = %e, "failed to remove temporary file");
        }
    }
}

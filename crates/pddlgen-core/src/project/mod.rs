//! The generated planning project and its four artifacts.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A fully generated planning project.
///
/// Wire names are camelCase to match the response schema sent to the
/// generation service. Deserialization enforces the all-or-nothing
/// invariant: every field must be present as a string or the whole payload
/// is rejected -- no partial instance is ever constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedProject {
    /// Human-readable project report (markdown).
    pub project_report: String,
    /// Contents of the planning domain definition file.
    pub domain_pddl: String,
    /// Contents of the planning problem definition file.
    pub problem_pddl: String,
    /// Sample planner run, including the invocation command used.
    pub planner_output: String,
}

/// One of the four artifacts of a generated project.
///
/// Doubles as the tab identity in the studio: each variant knows its tab
/// label, its fixed on-disk filename, and which project field it projects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Artifact {
    Report,
    Domain,
    Problem,
    PlannerOutput,
}

impl Artifact {
    /// All artifacts in tab order.
    pub const ALL: [Artifact; 4] = [
        Artifact::Report,
        Artifact::Domain,
        Artifact::Problem,
        Artifact::PlannerOutput,
    ];

    /// Tab label shown in the selector.
    pub fn label(self) -> &'static str {
        match self {
            Artifact::Report => "Report",
            Artifact::Domain => "domain.pddl",
            Artifact::Problem => "problem.pddl",
            Artifact::PlannerOutput => "Planner Output",
        }
    }

    /// Fixed filename used when saving this artifact.
    pub fn filename(self) -> &'static str {
        match self {
            Artifact::Report => "report.md",
            Artifact::Domain => "domain.pddl",
            Artifact::Problem => "problem.pddl",
            Artifact::PlannerOutput => "planner-output.txt",
        }
    }

    /// Project the matching field out of a generated project, verbatim.
    pub fn text(self, project: &GeneratedProject) -> &str {
        match self {
            Artifact::Report => &project.project_report,
            Artifact::Domain => &project.domain_pddl,
            Artifact::Problem => &project.problem_pddl,
            Artifact::PlannerOutput => &project.planner_output,
        }
    }

    /// Next artifact in tab order, wrapping around.
    pub fn next(self) -> Artifact {
        match self {
            Artifact::Report => Artifact::Domain,
            Artifact::Domain => Artifact::Problem,
            Artifact::Problem => Artifact::PlannerOutput,
            Artifact::PlannerOutput => Artifact::Report,
        }
    }

    /// Previous artifact in tab order, wrapping around.
    pub fn prev(self) -> Artifact {
        match self {
            Artifact::Report => Artifact::PlannerOutput,
            Artifact::Domain => Artifact::Report,
            Artifact::Problem => Artifact::Domain,
            Artifact::PlannerOutput => Artifact::Problem,
        }
    }

    /// Position of this artifact in [`Artifact::ALL`].
    pub fn index(self) -> usize {
        match self {
            Artifact::Report => 0,
            Artifact::Domain => 1,
            Artifact::Problem => 2,
            Artifact::PlannerOutput => 3,
        }
    }
}

/// Errors from writing artifacts to disk.
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("failed to create output directory {path}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SaveError {
    fn create_dir(path: &Path, source: std::io::Error) -> Self {
        Self::CreateDir {
            path: path.to_path_buf(),
            source,
        }
    }

    fn write(path: PathBuf, source: std::io::Error) -> Self {
        Self::Write { path, source }
    }
}

impl GeneratedProject {
    /// Write one artifact into `dir` under its fixed filename.
    ///
    /// The file contains the exact field bytes; nothing is trimmed or
    /// reformatted. Returns the path written.
    pub fn save_artifact(&self, artifact: Artifact, dir: &Path) -> Result<PathBuf, SaveError> {
        fs::create_dir_all(dir).map_err(|e| SaveError::create_dir(dir, e))?;
        let path = dir.join(artifact.filename());
        fs::write(&path, artifact.text(self)).map_err(|e| SaveError::write(path.clone(), e))?;
        Ok(path)
    }

    /// Write all four artifacts into `dir`. Returns the paths written, in
    /// tab order.
    pub fn save_all(&self, dir: &Path) -> Result<Vec<PathBuf>, SaveError> {
        Artifact::ALL
            .iter()
            .map(|&a| self.save_artifact(a, dir))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> GeneratedProject {
        GeneratedProject {
            project_report: "# Report".to_string(),
            domain_pddl: "(define (domain test))".to_string(),
            problem_pddl: "(define (problem test))".to_string(),
            planner_output: "plan cost: 7".to_string(),
        }
    }

    #[test]
    fn filenames_are_fixed() {
        assert_eq!(Artifact::Report.filename(), "report.md");
        assert_eq!(Artifact::Domain.filename(), "domain.pddl");
        assert_eq!(Artifact::Problem.filename(), "problem.pddl");
        assert_eq!(Artifact::PlannerOutput.filename(), "planner-output.txt");
    }

    #[test]
    fn text_projects_the_matching_field_verbatim() {
        let p = sample();
        assert_eq!(Artifact::Report.text(&p), "# Report");
        assert_eq!(Artifact::Domain.text(&p), "(define (domain test))");
        assert_eq!(Artifact::Problem.text(&p), "(define (problem test))");
        assert_eq!(Artifact::PlannerOutput.text(&p), "plan cost: 7");
    }

    #[test]
    fn tab_cycling_wraps_both_ways() {
        let mut a = Artifact::Report;
        for _ in 0..4 {
            a = a.next();
        }
        assert_eq!(a, Artifact::Report);

        let mut a = Artifact::Report;
        for _ in 0..4 {
            a = a.prev();
        }
        assert_eq!(a, Artifact::Report);

        assert_eq!(Artifact::Report.prev(), Artifact::PlannerOutput);
        assert_eq!(Artifact::PlannerOutput.next(), Artifact::Report);
    }

    #[test]
    fn index_matches_tab_order() {
        for (i, a) in Artifact::ALL.iter().enumerate() {
            assert_eq!(a.index(), i);
        }
    }

    #[test]
    fn save_artifact_writes_exact_field_bytes() {
        let tmp = tempfile::TempDir::new().unwrap();
        let p = sample();

        let path = p.save_artifact(Artifact::Domain, tmp.path()).unwrap();
        assert!(path.ends_with("domain.pddl"), "unexpected path: {path:?}");

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, p.domain_pddl);
    }

    #[test]
    fn save_all_writes_the_four_fixed_filenames() {
        let tmp = tempfile::TempDir::new().unwrap();
        let p = sample();

        let paths = p.save_all(tmp.path()).unwrap();
        assert_eq!(paths.len(), 4);

        for a in Artifact::ALL {
            let path = tmp.path().join(a.filename());
            assert!(path.exists(), "missing {path:?}");
            assert_eq!(std::fs::read_to_string(&path).unwrap(), a.text(&p));
        }
    }

    #[test]
    fn save_all_creates_nested_output_dirs() {
        let tmp = tempfile::TempDir::new().unwrap();
        let dir = tmp.path().join("out").join("project");
        sample().save_all(&dir).unwrap();
        assert!(dir.join("report.md").exists());
    }
}

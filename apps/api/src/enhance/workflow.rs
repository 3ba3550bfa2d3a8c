//! Enhancement workflow: selecting → processing → reviewing.
//!
//! A batch issues one enhancement per selected field, strictly in sequence:
//! bio first, then every experience bullet, then every project description.
//! The first failure discards the whole batch; nothing is committed until
//! the review is accepted.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::enhance::service::{enhance_field, Enhancer};
use crate::errors::AppError;
use crate::models::enhancement::{EnhancementContext, EnhancementRequest, EnhancementResult};
use crate::models::portfolio::PortfolioDocument;

const EMPTY_SELECTION: &str = "Please select at least one section to enhance";

/// Which parts of the document a batch should rewrite.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    #[serde(default)]
    pub bio: bool,
    #[serde(default)]
    pub experience: bool,
    #[serde(default)]
    pub projects: bool,
}

impl Selection {
    pub fn is_empty(&self) -> bool {
        !(self.bio || self.experience || self.projects)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobEnhancement {
    pub title: String,
    pub company: String,
    pub points: Vec<EnhancementResult>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectEnhancement {
    pub name: String,
    #[serde(flatten)]
    pub result: EnhancementResult,
}

/// Results of a completed batch, positionally aligned with the source document.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EnhancementBatch {
    pub bio: Option<EnhancementResult>,
    pub experience: Option<Vec<JobEnhancement>>,
    pub projects: Option<Vec<ProjectEnhancement>>,
}

impl EnhancementBatch {
    /// Returns a new document with every enhanced field replaced.
    ///
    /// A field is only replaced while it still holds the text the batch was
    /// computed from, so edits made during review are never overwritten.
    pub fn apply_to(&self, document: &PortfolioDocument) -> PortfolioDocument {
        let mut updated = document.clone();

        if let Some(bio) = &self.bio {
            if updated.about == bio.original {
                updated.about = bio.enhanced.clone();
            }
        }

        if let Some(jobs) = &self.experience {
            for (job, enhanced_job) in updated.experience.iter_mut().zip(jobs) {
                for (point, result) in job.points.iter_mut().zip(&enhanced_job.points) {
                    if *point == result.original {
                        *point = result.enhanced.clone();
                    }
                }
            }
        }

        if let Some(projects) = &self.projects {
            for (project, enhanced) in updated.projects.iter_mut().zip(projects) {
                if project.description == enhanced.result.original {
                    project.description = enhanced.result.enhanced.clone();
                }
            }
        }

        updated
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum WorkflowState {
    Selecting {
        selection: Selection,
        error: Option<String>,
    },
    Processing {
        selection: Selection,
    },
    Reviewing {
        selection: Selection,
        batch: EnhancementBatch,
    },
}

impl Default for WorkflowState {
    fn default() -> Self {
        WorkflowState::Selecting {
            selection: Selection::default(),
            error: None,
        }
    }
}

#[derive(Debug, Default)]
pub struct EnhancementWorkflow {
    state: WorkflowState,
}

impl EnhancementWorkflow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    /// Runs a batch over `document`. Only valid while selecting.
    ///
    /// On success the workflow moves to reviewing and a copy of the batch is
    /// returned. On failure it returns to selecting with the error recorded.
    pub async fn run(
        &mut self,
        selection: Selection,
        document: &PortfolioDocument,
        enhancer: &dyn Enhancer,
    ) -> Result<EnhancementBatch, AppError> {
        match &self.state {
            WorkflowState::Selecting { .. } => {}
            WorkflowState::Processing { .. } => {
                return Err(AppError::Conflict(
                    "An enhancement batch is already running".to_string(),
                ))
            }
            WorkflowState::Reviewing { .. } => {
                return Err(AppError::Conflict(
                    "Accept or reject the pending enhancements first".to_string(),
                ))
            }
        }

        if selection.is_empty() {
            self.state = WorkflowState::Selecting {
                selection,
                error: Some(EMPTY_SELECTION.to_string()),
            };
            return Err(AppError::Validation(EMPTY_SELECTION.to_string()));
        }

        self.state = WorkflowState::Processing { selection };

        match process_batch(selection, document, enhancer).await {
            Ok(batch) => {
                info!("Enhancement batch ready for review");
                self.state = WorkflowState::Reviewing {
                    selection,
                    batch: batch.clone(),
                };
                Ok(batch)
            }
            Err(e) => {
                warn!("Enhancement batch failed, discarding partial results: {e}");
                self.state = WorkflowState::Selecting {
                    selection,
                    error: Some(format!("Failed to enhance content: {e}")),
                };
                Err(e)
            }
        }
    }

    /// Merges the reviewed batch into `document` and returns the new value.
    /// The review stays pending until [`Self::complete_review`].
    pub fn merged(&self, document: &PortfolioDocument) -> Result<PortfolioDocument, AppError> {
        let WorkflowState::Reviewing { batch, .. } = &self.state else {
            return Err(AppError::Conflict(
                "There are no enhancements awaiting review".to_string(),
            ));
        };
        Ok(batch.apply_to(document))
    }

    /// Leaves review once the merged document has been persisted.
    pub fn complete_review(&mut self) {
        if let WorkflowState::Reviewing { .. } = self.state {
            self.state = WorkflowState::default();
        }
    }

    /// Discards any reviewed results and clears the selection.
    pub fn reject(&mut self) -> Result<(), AppError> {
        if let WorkflowState::Processing { .. } = self.state {
            return Err(AppError::Conflict(
                "An enhancement batch is still running".to_string(),
            ));
        }
        self.state = WorkflowState::default();
        Ok(())
    }
}

async fn process_batch(
    selection: Selection,
    document: &PortfolioDocument,
    enhancer: &dyn Enhancer,
) -> Result<EnhancementBatch, AppError> {
    let mut batch = EnhancementBatch::default();

    if selection.bio && !document.about.trim().is_empty() {
        let request = EnhancementRequest {
            original_text: document.about.clone(),
            context: EnhancementContext::Bio {
                experience: serde_json::to_value(&document.experience).ok(),
            },
        };
        batch.bio = Some(enhance_field(enhancer, request).await?);
    }

    if selection.experience {
        let mut jobs = Vec::with_capacity(document.experience.len());
        for job in &document.experience {
            let mut points = Vec::with_capacity(job.points.len());
            for point in &job.points {
                let request = EnhancementRequest {
                    original_text: point.clone(),
                    context: EnhancementContext::BulletPoint {
                        title: non_empty(&job.title),
                        company: non_empty(&job.company),
                    },
                };
                points.push(enhance_or_keep(enhancer, request).await?);
            }
            jobs.push(JobEnhancement {
                title: job.title.clone(),
                company: job.company.clone(),
                points,
            });
        }
        batch.experience = Some(jobs);
    }

    if selection.projects {
        let mut projects = Vec::with_capacity(document.projects.len());
        for project in &document.projects {
            let request = EnhancementRequest {
                original_text: project.description.clone(),
                context: EnhancementContext::ProjectDescription {
                    name: non_empty(&project.name),
                    tech: project.tech.clone(),
                },
            };
            projects.push(ProjectEnhancement {
                name: project.name.clone(),
                result: enhance_or_keep(enhancer, request).await?,
            });
        }
        batch.projects = Some(projects);
    }

    Ok(batch)
}

/// Blank fields pass through unchanged instead of costing a gateway call.
async fn enhance_or_keep(
    enhancer: &dyn Enhancer,
    request: EnhancementRequest,
) -> Result<EnhancementResult, AppError> {
    if request.original_text.trim().is_empty() {
        return Ok(EnhancementResult {
            original: request.original_text.clone(),
            enhanced: request.original_text,
        });
    }
    enhance_field(enhancer, request).await
}

fn non_empty(s: &str) -> Option<String> {
    (!s.trim().is_empty()).then(|| s.to_string())
}

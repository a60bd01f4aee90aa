//! In-memory assessment store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::assessment::Assessment;
use crate::domain::foundation::{AssessmentType, CustomerId, DomainError};
use crate::ports::AssessmentStore;

/// Holds the live assessment per `(customer, type)`.
///
/// Assessments are written by the owning system; `put` stands in for that
/// and replaces whatever was live before.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAssessmentStore {
    assessments: Arc<RwLock<HashMap<(CustomerId, AssessmentType), Assessment>>>,
}

impl InMemoryAssessmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `assessment` the live one for its customer and type.
    pub async fn put(&self, assessment: Assessment) {
        let key = (assessment.customer_id.clone(), assessment.assessment_type);
        self.assessments.write().await.insert(key, assessment);
    }

    /// Removes the live assessment, as when the owning system deletes it.
    pub async fn remove(&self, customer_id: &CustomerId, assessment_type: AssessmentType) {
        self.assessments
            .write()
            .await
            .remove(&(customer_id.clone(), assessment_type));
    }
}

#[async_trait]
impl AssessmentStore for InMemoryAssessmentStore {
    async fn find_by_customer_and_type(
        &self,
        customer_id: &CustomerId,
        assessment_type: AssessmentType,
    ) -> Result<Option<Assessment>, DomainError> {
        let assessments = self.assessments.read().await;
        Ok(assessments
            .get(&(customer_id.clone(), assessment_type))
            .cloned())
    }
}

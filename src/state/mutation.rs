/// Mutation lifecycle tracking
///
/// Each mutation kind runs `Idle -> Pending -> Succeeded | Failed`, and a new
/// invocation restarts the cycle. Several invocations of one kind may be in
/// flight (delete buttons are never disabled), so the tracker counts them and
/// reports `Pending` until the last one settled.
use crate::api::{ApiError, ApiResult};

/// The three write operations against the recipe service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Create,
    Update,
    Delete,
}

impl MutationKind {
    pub fn label(self) -> &'static str {
        match self {
            MutationKind::Create => "create",
            MutationKind::Update => "update",
            MutationKind::Delete => "delete",
        }
    }
}

/// Observable state of one mutation kind
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum MutationStatus {
    #[default]
    Idle,
    Pending,
    Succeeded,
    Failed(ApiError),
}

#[derive(Debug, Clone, Default)]
pub struct Mutation {
    in_flight: usize,
    last: MutationStatus,
}

impl Mutation {
    pub fn begin(&mut self) {
        self.in_flight += 1;
    }

    pub fn settle<T>(&mut self, result: &ApiResult<T>) {
        self.in_flight = self.in_flight.saturating_sub(1);
        self.last = match result {
            Ok(_) => MutationStatus::Succeeded,
            Err(err) => MutationStatus::Failed(err.clone()),
        };
    }

    pub fn status(&self) -> MutationStatus {
        if self.in_flight > 0 {
            MutationStatus::Pending
        } else {
            self.last.clone()
        }
    }

    pub fn is_pending(&self) -> bool {
        self.in_flight > 0
    }

    /// Error of the most recent settlement, if it failed
    pub fn error(&self) -> Option<&ApiError> {
        match &self.last {
            MutationStatus::Failed(err) => Some(err),
            _ => None,
        }
    }
}

/// One tracker per mutation kind
#[derive(Debug, Clone, Default)]
pub struct Mutations {
    create: Mutation,
    update: Mutation,
    delete: Mutation,
}

impl Mutations {
    pub fn get(&self, kind: MutationKind) -> &Mutation {
        match kind {
            MutationKind::Create => &self.create,
            MutationKind::Update => &self.update,
            MutationKind::Delete => &self.delete,
        }
    }

    pub fn get_mut(&mut self, kind: MutationKind) -> &mut Mutation {
        match kind {
            MutationKind::Create => &mut self.create,
            MutationKind::Update => &mut self.update,
            MutationKind::Delete => &mut self.delete,
        }
    }
}

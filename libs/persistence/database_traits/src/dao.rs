use async_trait::async_trait;

/// Persistence seam for a single model type.
///
/// Handlers hold implementors behind `Arc<dyn GenericDao<..>>` so the
/// PostgreSQL adapter can be swapped for an in-memory one in tests.
#[async_trait]
pub trait GenericDao {
    type Model: Send + Sync + 'static;
    type CreateRequest: Send + Sync + 'static;
    type Error: Send + 'static;

    async fn create(
        &self, req: Self::CreateRequest,
    ) -> Result<Self::Model, Self::Error>;
}

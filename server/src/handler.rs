use driver::database::PostgresDatabase;
use kernel::interface::query::DependOnBookQuery;
use kernel::interface::update::DependOnBookModifier;
use kernel::KernelError;
use std::ops::Deref;
use std::sync::Arc;

/// Everything the book routes need from a storage backend.
pub trait BookDatabase: DependOnBookQuery + DependOnBookModifier {}

impl<T> BookDatabase for T where T: DependOnBookQuery + DependOnBookModifier {}

pub struct AppModule<D = PostgresDatabase>(Arc<Handler<D>>);

impl AppModule<PostgresDatabase> {
    pub async fn new() -> error_stack::Result<Self, KernelError> {
        Ok(Self(Arc::new(Handler::init().await?)))
    }
}

impl<D> AppModule<D> {
    pub fn from_database(database: D) -> Self {
        Self(Arc::new(Handler { database }))
    }
}

impl<D> Clone for AppModule<D> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<D> Deref for AppModule<D> {
    type Target = Handler<D>;
    fn deref(&self) -> &Self::Target {
        Deref::deref(&self.0)
    }
}

pub struct Handler<D> {
    database: D,
}

impl Handler<PostgresDatabase> {
    pub async fn init() -> error_stack::Result<Self, KernelError> {
        let database = PostgresDatabase::new().await?;

        Ok(Self { database })
    }
}

impl<D> Handler<D> {
    pub fn database(&self) -> &D {
        &self.database
    }
}

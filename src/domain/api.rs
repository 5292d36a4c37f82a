//! Backend trait definition
//!
//! The controller talks to the catalog backend only through this trait.
//! The reqwest implementation lives in the infrastructure layer.

use async_trait::async_trait;

use super::ClientError;
use crate::models::{Book, BookId, BookPayload};

/// REST surface of the catalog backend (`/api/books[/{id}]`)
#[async_trait]
pub trait BookApi: Send + Sync {
    /// `GET /api/books`
    async fn list(&self) -> Result<Vec<Book>, ClientError>;

    /// `GET /api/books/{id}`
    async fn get(&self, id: &BookId) -> Result<Book, ClientError>;

    /// `POST /api/books`
    async fn create(&self, book: &BookPayload) -> Result<(), ClientError>;

    /// `PUT /api/books/{id}`
    async fn update(&self, id: &BookId, book: &BookPayload) -> Result<(), ClientError>;

    /// `DELETE /api/books/{id}`
    async fn delete(&self, id: &BookId) -> Result<(), ClientError>;
}

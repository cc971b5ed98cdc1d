//! `SeaORM` implementation of the `DirectorService` trait.

use crate::db::Store;
use crate::models::director::{Director, DirectorInput};
use crate::models::page::{Page, PageRequest};
use crate::services::director_service::{DirectorError, DirectorService};
use async_trait::async_trait;

pub struct SeaOrmDirectorService {
    store: Store,
}

impl SeaOrmDirectorService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl DirectorService for SeaOrmDirectorService {
    async fn list_directors(&self, request: PageRequest) -> Result<Page<Director>, DirectorError> {
        if request.page == 0 {
            return Err(DirectorError::InvalidPage(request.page));
        }

        let (items, total) = self
            .store
            .list_directors(request.offset(), request.page_size)
            .await?;

        if request.is_out_of_range(total) {
            return Err(DirectorError::InvalidPage(request.page));
        }

        Ok(Page::new(items, total, request))
    }

    async fn get_director(&self, id: i32) -> Result<Director, DirectorError> {
        self.store
            .get_director(id)
            .await?
            .ok_or(DirectorError::NotFound(id))
    }

    async fn director_exists(&self, id: i32) -> Result<bool, DirectorError> {
        Ok(self.store.director_exists(id).await?)
    }

    async fn create_director(&self, input: DirectorInput) -> Result<Director, DirectorError> {
        Ok(self.store.create_director(input).await?)
    }

    async fn update_director(
        &self,
        id: i32,
        input: DirectorInput,
    ) -> Result<Director, DirectorError> {
        self.store
            .update_director(id, input)
            .await?
            .ok_or(DirectorError::NotFound(id))
    }

    async fn delete_director(&self, id: i32) -> Result<(), DirectorError> {
        if self.store.delete_director(id).await? {
            Ok(())
        } else {
            Err(DirectorError::NotFound(id))
        }
    }
}

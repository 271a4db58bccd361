//! `SQLite` implementation of the phonebook repository.

use async_trait::async_trait;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use dialer_core::utils::timestamp::{self, format_datetime};
use dialer_core::{
    NewPhonebook, Page, PageRequest, Phonebook, PhonebookFilter, PhonebookRepository,
    RepositoryError, Scope,
};

use super::row_mappers::{
    WhereClause, map_sqlx_error, parse_stored_datetime, push_page, storage_error, to_page,
};

const PHONEBOOK_COLUMNS: &str =
    "id, name, description, campaign_id, user_id, created_date, updated_date";

pub struct SqlitePhonebookRepository {
    pool: SqlitePool,
}

impl SqlitePhonebookRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct PhonebookRow {
    id: i64,
    name: String,
    description: String,
    campaign_id: Option<i64>,
    user_id: i64,
    created_date: String,
    updated_date: String,
}

impl PhonebookRow {
    fn into_phonebook(self) -> Result<Phonebook, RepositoryError> {
        Ok(Phonebook {
            id: self.id,
            name: self.name,
            description: self.description,
            campaign_id: self.campaign_id,
            user_id: self.user_id,
            created_date: parse_stored_datetime(&self.created_date, "created_date")?,
            updated_date: parse_stored_datetime(&self.updated_date, "updated_date")?,
        })
    }
}

fn push_phonebook_filter(qb: &mut QueryBuilder<'_, Sqlite>, filter: &PhonebookFilter) {
    let mut clause = WhereClause::new();
    clause.scope(qb, filter.scope);
    clause.name(qb, "name", filter.name.as_ref());
}

#[async_trait]
impl PhonebookRepository for SqlitePhonebookRepository {
    async fn list(
        &self,
        filter: &PhonebookFilter,
        page: PageRequest,
    ) -> Result<Page<Phonebook>, RepositoryError> {
        let mut count = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM phonebooks");
        push_phonebook_filter(&mut count, filter);
        let total = count
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(storage_error)?;

        let mut select =
            QueryBuilder::<Sqlite>::new(format!("SELECT {PHONEBOOK_COLUMNS} FROM phonebooks"));
        push_phonebook_filter(&mut select, filter);
        push_page(&mut select, page);
        let rows = select
            .build_query_as::<PhonebookRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(storage_error)?;

        let phonebooks = rows
            .into_iter()
            .map(PhonebookRow::into_phonebook)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(to_page(phonebooks, total, page))
    }

    async fn get_by_id(&self, id: i64) -> Result<Phonebook, RepositoryError> {
        let query = format!("SELECT {PHONEBOOK_COLUMNS} FROM phonebooks WHERE id = ?");
        sqlx::query_as::<_, PhonebookRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_error)?
            .ok_or_else(|| RepositoryError::NotFound(format!("Phonebook with ID {id}")))?
            .into_phonebook()
    }

    async fn insert(&self, phonebook: &NewPhonebook) -> Result<Phonebook, RepositoryError> {
        let now = timestamp::now();
        let result = sqlx::query(
            r#"
            INSERT INTO phonebooks
                (name, description, campaign_id, user_id, created_date, updated_date)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&phonebook.name)
        .bind(&phonebook.description)
        .bind(phonebook.campaign_id)
        .bind(phonebook.user_id)
        .bind(format_datetime(&now))
        .bind(format_datetime(&now))
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error(e, &format!("phonebook '{}'", phonebook.name)))?;

        Ok(Phonebook {
            id: result.last_insert_rowid(),
            name: phonebook.name.clone(),
            description: phonebook.description.clone(),
            campaign_id: phonebook.campaign_id,
            user_id: phonebook.user_id,
            created_date: now,
            updated_date: now,
        })
    }

    async fn update(&self, phonebook: &Phonebook) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r#"
            UPDATE phonebooks SET name = ?, description = ?, campaign_id = ?, updated_date = ?
            WHERE id = ?
            "#,
        )
        .bind(&phonebook.name)
        .bind(&phonebook.description)
        .bind(phonebook.campaign_id)
        .bind(format_datetime(&phonebook.updated_date))
        .bind(phonebook.id)
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error(e, &format!("phonebook '{}'", phonebook.name)))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!(
                "Phonebook with ID {}",
                phonebook.id
            )));
        }
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM phonebooks WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(storage_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("Phonebook with ID {id}")));
        }
        Ok(())
    }

    async fn delete_all(&self, scope: Scope) -> Result<u64, RepositoryError> {
        let mut query = QueryBuilder::<Sqlite>::new("DELETE FROM phonebooks");
        WhereClause::new().scope(&mut query, scope);
        let result = query
            .build()
            .execute(&self.pool)
            .await
            .map_err(storage_error)?;
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::TestDb;
    use dialer_core::{NameFilter, NewUser, UserRepository};

    fn new_phonebook(user_id: i64, name: &str) -> NewPhonebook {
        NewPhonebook {
            name: name.to_string(),
            description: String::new(),
            campaign_id: None,
            user_id,
        }
    }

    #[tokio::test]
    async fn test_crud_cycle() {
        let db = TestDb::new().await.unwrap();
        let owner = db
            .user_repository()
            .insert(&NewUser::new("alice", "h"))
            .await
            .unwrap();
        let repo = db.phonebook_repository();

        let created = repo.insert(&new_phonebook(owner.id, "leads")).await.unwrap();
        assert_eq!(repo.get_by_id(created.id).await.unwrap(), created);

        let mut changed = created.clone();
        changed.description = "warm leads".to_string();
        repo.update(&changed).await.unwrap();
        assert_eq!(repo.get_by_id(created.id).await.unwrap().description, "warm leads");

        repo.delete(created.id).await.unwrap();
        assert!(matches!(
            repo.get_by_id(created.id).await,
            Err(RepositoryError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_list_scope_and_name_filters() {
        let db = TestDb::new().await.unwrap();
        let users = db.user_repository();
        let alice = users.insert(&NewUser::new("alice", "h")).await.unwrap().id;
        let bob = users.insert(&NewUser::new("bob", "h")).await.unwrap().id;
        let repo = db.phonebook_repository();

        repo.insert(&new_phonebook(alice, "leads 2024")).await.unwrap();
        repo.insert(&new_phonebook(alice, "customers")).await.unwrap();
        repo.insert(&new_phonebook(bob, "leads")).await.unwrap();

        let mine = repo
            .list(&PhonebookFilter::new(Scope::Owner(alice)), PageRequest::default())
            .await
            .unwrap();
        assert_eq!(mine.total_count, 2);

        let mut filter = PhonebookFilter::new(Scope::All);
        filter.name = Some(NameFilter::Exact("leads".to_string()));
        let exact = repo.list(&filter, PageRequest::default()).await.unwrap();
        assert_eq!(exact.total_count, 1);
        assert_eq!(exact.items[0].user_id, bob);

        assert_eq!(repo.delete_all(Scope::Owner(alice)).await.unwrap(), 2);
        assert_eq!(
            repo.list(&PhonebookFilter::new(Scope::All), PageRequest::default())
                .await
                .unwrap()
                .total_count,
            1
        );
    }
}

//! Declarative test builder.
//!
//! The builder queues table and index statements and executes them in `build()`, after
//! which fixtures are inserted through the returned [`TestContext`].

use sea_orm::{
    sea_query::{Index, IndexCreateStatement, TableCreateStatement},
    DbBackend, EntityTrait, Schema,
};

use crate::{error::TestError, TestContext};

/// Builder for declarative test initialization.
pub struct TestBuilder {
    tables: Vec<TableCreateStatement>,
    indexes: Vec<IndexCreateStatement>,
    include_academic_tables: bool,
}

impl TestBuilder {
    /// Create a new builder with no tables configured.
    pub fn new() -> Self {
        Self {
            tables: Vec::new(),
            indexes: Vec::new(),
            include_academic_tables: false,
        }
    }

    /// Add every table of the academic schema, including the composite unique indexes
    /// on enrollments, grades and submissions.
    pub fn with_academic_tables(mut self) -> Self {
        self.include_academic_tables = true;
        self
    }

    /// Add a single entity table to the test database.
    ///
    /// Chain multiple calls to add multiple tables. Referenced tables should be added first.
    ///
    /// ```no_run
    /// use registrar_test_utils::TestBuilder;
    /// use entity::prelude::*;
    ///
    /// # async fn example() -> Result<(), registrar_test_utils::TestError> {
    /// let test = TestBuilder::new()
    ///     .with_table(User)
    ///     .with_table(Notification)
    ///     .build()
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Build the test context, creating the academic tables (if requested) followed by
    /// any custom tables, then the indexes.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Test environment ready for fixtures
    /// - `Err(TestError::DbErr)` - Connection or schema creation failed
    pub async fn build(self) -> Result<TestContext, TestError> {
        let context = TestContext::new().await?;

        let mut all_tables = Vec::new();
        let mut all_indexes = Vec::new();

        if self.include_academic_tables {
            let schema = Schema::new(DbBackend::Sqlite);
            all_tables.extend(vec![
                schema.create_table_from_entity(entity::prelude::User),
                schema.create_table_from_entity(entity::prelude::Student),
                schema.create_table_from_entity(entity::prelude::Teacher),
                schema.create_table_from_entity(entity::prelude::Course),
                schema.create_table_from_entity(entity::prelude::Enrollment),
                schema.create_table_from_entity(entity::prelude::Grade),
                schema.create_table_from_entity(entity::prelude::Assignment),
                schema.create_table_from_entity(entity::prelude::Submission),
                schema.create_table_from_entity(entity::prelude::Material),
                schema.create_table_from_entity(entity::prelude::Notification),
                schema.create_table_from_entity(entity::prelude::SystemConfig),
            ]);
            all_indexes.extend(academic_unique_indexes());
        }

        all_tables.extend(self.tables);
        all_indexes.extend(self.indexes);

        context.with_tables(all_tables).await?;
        context.with_indexes(all_indexes).await?;

        Ok(context)
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Mirrors the composite unique indexes created by the migrations.
fn academic_unique_indexes() -> Vec<IndexCreateStatement> {
    vec![
        Index::create()
            .name("idx-enrollments-student_id-course_id")
            .table(entity::prelude::Enrollment)
            .col(entity::enrollment::Column::StudentId)
            .col(entity::enrollment::Column::CourseId)
            .unique()
            .to_owned(),
        Index::create()
            .name("idx-grades-student_id-course_id")
            .table(entity::prelude::Grade)
            .col(entity::grade::Column::StudentId)
            .col(entity::grade::Column::CourseId)
            .unique()
            .to_owned(),
        Index::create()
            .name("idx-submissions-assignment_id-student_id")
            .table(entity::prelude::Submission)
            .col(entity::submission::Column::AssignmentId)
            .col(entity::submission::Column::StudentId)
            .unique()
            .to_owned(),
    ]
}

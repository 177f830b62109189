use recipebox_db::table::{Follow, User};
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::{SqlitePool, prelude::FromRow};

use crate::Role;

#[derive(Debug, FromRow)]
pub struct UserRow {
    pub id: String,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
    pub role: sqlx::types::Text<Role>,
}

impl UserRow {
    pub fn is_admin(&self) -> bool {
        self.role.0 == Role::Admin
    }
}

pub enum FindType {
    Id(String),
    Email(String),
    Username(String),
}

pub async fn find(
    pool: &SqlitePool,
    arg_type: FindType,
) -> recipebox_shared::Result<Option<UserRow>> {
    let mut statement = Query::select()
        .columns([
            User::Id,
            User::Email,
            User::Username,
            User::FirstName,
            User::LastName,
            User::PasswordHash,
            User::Role,
        ])
        .from(User::Table)
        .limit(1)
        .to_owned();

    match arg_type {
        FindType::Id(id) => statement.and_where(Expr::col(User::Id).eq(id)),
        FindType::Email(email) => statement.and_where(Expr::col(User::Email).eq(email)),
        FindType::Username(username) => {
            statement.and_where(Expr::col(User::Username).eq(username))
        }
    };

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_as_with::<_, UserRow, _>(&sql, values)
        .fetch_optional(pool)
        .await?)
}

pub struct CreateInput {
    pub id: String,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
}

pub async fn create(pool: &SqlitePool, input: CreateInput) -> recipebox_shared::Result<()> {
    let statement = Query::insert()
        .into_table(User::Table)
        .columns([
            User::Id,
            User::Email,
            User::Username,
            User::FirstName,
            User::LastName,
            User::PasswordHash,
            User::Role,
            User::CreatedAt,
        ])
        .values_panic([
            input.id.into(),
            input.email.into(),
            input.username.into(),
            input.first_name.into(),
            input.last_name.into(),
            input.password_hash.into(),
            Role::User.to_string().into(),
            recipebox_shared::now().into(),
        ])
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    sqlx::query_with(&sql, values).execute(pool).await?;

    Ok(())
}

pub async fn update_role(
    pool: &SqlitePool,
    id: impl Into<String>,
    role: Role,
) -> recipebox_shared::Result<()> {
    let statement = Query::update()
        .table(User::Table)
        .value(User::Role, role.as_ref())
        .and_where(Expr::col(User::Id).eq(id.into()))
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(pool).await?;

    Ok(())
}

pub async fn is_following(
    pool: &SqlitePool,
    user_id: impl Into<String>,
    author_id: impl Into<String>,
) -> recipebox_shared::Result<bool> {
    let statement = Query::select()
        .column(Follow::Id)
        .from(Follow::Table)
        .and_where(Expr::col(Follow::UserId).eq(user_id.into()))
        .and_where(Expr::col(Follow::AuthorId).eq(author_id.into()))
        .limit(1)
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    let row = sqlx::query_as_with::<_, (String,), _>(&sql, values)
        .fetch_optional(pool)
        .await?;

    Ok(row.is_some())
}

use sea_query::Iden;

#[derive(Iden, Clone)]
pub enum User {
    Table,
    Id,
    Email,
    Username,
    FirstName,
    LastName,
    PasswordHash,
    Role,
    CreatedAt,
}

#[derive(Iden, Clone)]
pub enum Follow {
    Table,
    Id,
    UserId,
    AuthorId,
    CreatedAt,
}

#[derive(Iden, Clone)]
pub enum Ingredient {
    Table,
    Id,
    Name,
    MeasurementUnit,
}

#[derive(Iden, Clone)]
pub enum Tag {
    Table,
    Id,
    Name,
    Color,
    Slug,
}

#[derive(Iden, Clone)]
pub enum Recipe {
    Table,
    Id,
    AuthorId,
    Name,
    Image,
    Text,
    CookingTime,
    CreatedAt,
}

#[derive(Iden, Clone)]
pub enum RecipeIngredient {
    Table,
    Id,
    RecipeId,
    IngredientId,
    Amount,
    Position,
}

#[derive(Iden, Clone)]
pub enum RecipeTag {
    Table,
    Id,
    RecipeId,
    TagId,
}

#[derive(Iden, Clone)]
pub enum Favorite {
    Table,
    Id,
    UserId,
    RecipeId,
    AddedAt,
}

#[derive(Iden, Clone)]
pub enum ShoppingCart {
    Table,
    Id,
    UserId,
    RecipeId,
    AddedAt,
}

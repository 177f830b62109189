use std::collections::HashMap;

use recipebox_recipe::Unit;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::CartRepository;

/// How cart ingredients are merged into shopping list lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum GroupingKey {
    /// Same name means same line. The first unit seen wins and later
    /// amounts are added as they are, whatever their unit.
    #[default]
    Name,
    /// Same name under different units gives separate lines.
    NameAndUnit,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregatedLine {
    pub name: String,
    pub unit: Unit,
    pub amount: u64,
}

/// Sums the ingredients of every recipe in a user's cart.
///
/// Output lines keep the order in which their key was first met, walking
/// cart entries oldest first and each recipe's lines in authored order.
/// Missing amounts count as zero.
pub struct ShoppingListAggregator<R> {
    repository: R,
    grouping: GroupingKey,
}

impl<R: CartRepository> ShoppingListAggregator<R> {
    pub fn new(repository: R, grouping: GroupingKey) -> Self {
        Self {
            repository,
            grouping,
        }
    }

    pub fn grouping(&self) -> GroupingKey {
        self.grouping
    }

    pub async fn aggregate(&self, user_id: &str) -> recipebox_shared::Result<Vec<AggregatedLine>> {
        let mut entries = self.repository.cart_entries(user_id).await?;
        entries.sort_by_key(|entry| entry.added_at);

        let mut lines: Vec<AggregatedLine> = Vec::new();
        let mut index: HashMap<(String, Option<Unit>), usize> = HashMap::new();

        for entry in entries {
            let Some(mut recipe_lines) = self.repository.recipe_lines(&entry.recipe_id).await?
            else {
                return Err(recipebox_shared::Error::Integrity(format!(
                    "cart of user {user_id} references missing recipe {}",
                    entry.recipe_id
                )));
            };
            recipe_lines.sort_by_key(|line| line.position);

            for line in recipe_lines {
                let Some(ingredient) = self.repository.find_ingredient(&line.ingredient_id).await?
                else {
                    return Err(recipebox_shared::Error::Integrity(format!(
                        "recipe {} references missing ingredient {}",
                        entry.recipe_id, line.ingredient_id
                    )));
                };

                let amount = u64::from(line.amount.unwrap_or(0));
                let key = match self.grouping {
                    GroupingKey::Name => (ingredient.name.to_owned(), None),
                    GroupingKey::NameAndUnit => {
                        (ingredient.name.to_owned(), Some(ingredient.unit))
                    }
                };

                match index.get(&key) {
                    Some(&at) => lines[at].amount = lines[at].amount.saturating_add(amount),
                    None => {
                        index.insert(key, lines.len());
                        lines.push(AggregatedLine {
                            name: ingredient.name,
                            unit: ingredient.unit,
                            amount,
                        });
                    }
                }
            }
        }

        tracing::debug!(user.id = %user_id, lines = lines.len(), "shopping list aggregated");

        Ok(lines)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use async_trait::async_trait;

    use super::*;
    use crate::{CartEntry, IngredientLine, IngredientRecord};

    #[derive(Default)]
    struct MemoryRepository {
        carts: HashMap<String, Vec<CartEntry>>,
        recipes: HashMap<String, Vec<IngredientLine>>,
        ingredients: HashMap<String, IngredientRecord>,
    }

    impl MemoryRepository {
        fn ingredient(mut self, id: &str, name: &str, unit: Unit) -> Self {
            self.ingredients.insert(
                id.to_owned(),
                IngredientRecord {
                    id: id.to_owned(),
                    name: name.to_owned(),
                    unit,
                },
            );
            self
        }

        fn recipe(mut self, id: &str, lines: &[(&str, Option<u32>)]) -> Self {
            let lines = lines
                .iter()
                .enumerate()
                .map(|(position, (ingredient_id, amount))| IngredientLine {
                    ingredient_id: ingredient_id.to_string(),
                    amount: *amount,
                    position: position as u32,
                })
                .collect();
            self.recipes.insert(id.to_owned(), lines);
            self
        }

        fn cart(mut self, user_id: &str, recipe_ids: &[&str]) -> Self {
            let entries = recipe_ids
                .iter()
                .map(|recipe_id| CartEntry {
                    recipe_id: recipe_id.to_string(),
                    added_at: 1_700_000_000,
                })
                .collect();
            self.carts.insert(user_id.to_owned(), entries);
            self
        }
    }

    #[async_trait]
    impl CartRepository for MemoryRepository {
        async fn cart_entries(&self, user_id: &str) -> recipebox_shared::Result<Vec<CartEntry>> {
            Ok(self.carts.get(user_id).cloned().unwrap_or_default())
        }

        async fn recipe_lines(
            &self,
            recipe_id: &str,
        ) -> recipebox_shared::Result<Option<Vec<IngredientLine>>> {
            Ok(self.recipes.get(recipe_id).cloned())
        }

        async fn find_ingredient(
            &self,
            id: &str,
        ) -> recipebox_shared::Result<Option<IngredientRecord>> {
            Ok(self.ingredients.get(id).cloned())
        }
    }

    fn line(name: &str, unit: Unit, amount: u64) -> AggregatedLine {
        AggregatedLine {
            name: name.to_owned(),
            unit,
            amount,
        }
    }

    fn pantry() -> MemoryRepository {
        MemoryRepository::default()
            .ingredient("sugar_g", "Sugar", Unit::Gram)
            .ingredient("sugar_kg", "Sugar", Unit::Kilogram)
            .ingredient("flour", "Flour", Unit::Kilogram)
            .ingredient("salt", "Salt", Unit::Gram)
    }

    #[tokio::test]
    async fn empty_cart_gives_empty_list() -> anyhow::Result<()> {
        let aggregator = ShoppingListAggregator::new(pantry(), GroupingKey::Name);
        assert!(aggregator.aggregate("john").await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn disjoint_names_are_kept_apart() -> anyhow::Result<()> {
        let repository = pantry()
            .recipe("cake", &[("flour", Some(1))])
            .recipe("soup", &[("salt", Some(5))])
            .cart("john", &["cake", "soup"]);
        let aggregator = ShoppingListAggregator::new(repository, GroupingKey::Name);

        assert_eq!(
            aggregator.aggregate("john").await?,
            vec![line("Flour", Unit::Kilogram, 1), line("Salt", Unit::Gram, 5)]
        );

        Ok(())
    }

    #[tokio::test]
    async fn same_ingredient_is_summed_across_recipes() -> anyhow::Result<()> {
        let repository = pantry()
            .recipe("cake", &[("sugar_g", Some(100))])
            .recipe("tea", &[("sugar_g", Some(50))])
            .cart("john", &["cake", "tea"]);
        let aggregator = ShoppingListAggregator::new(repository, GroupingKey::Name);

        assert_eq!(
            aggregator.aggregate("john").await?,
            vec![line("Sugar", Unit::Gram, 150)]
        );

        Ok(())
    }

    #[tokio::test]
    async fn name_grouping_keeps_first_unit() -> anyhow::Result<()> {
        let repository = pantry()
            .recipe("cake", &[("sugar_g", Some(100))])
            .recipe("jam", &[("sugar_kg", Some(2))])
            .cart("john", &["cake", "jam"]);
        let aggregator = ShoppingListAggregator::new(repository, GroupingKey::Name);

        assert_eq!(
            aggregator.aggregate("john").await?,
            vec![line("Sugar", Unit::Gram, 102)]
        );

        Ok(())
    }

    #[tokio::test]
    async fn name_and_unit_grouping_splits_units() -> anyhow::Result<()> {
        let repository = pantry()
            .recipe("cake", &[("sugar_g", Some(100)), ("flour", Some(1))])
            .recipe("jam", &[("sugar_kg", Some(2)), ("sugar_g", Some(20))])
            .cart("john", &["cake", "jam"]);
        let aggregator = ShoppingListAggregator::new(repository, GroupingKey::NameAndUnit);

        assert_eq!(
            aggregator.aggregate("john").await?,
            vec![
                line("Sugar", Unit::Gram, 120),
                line("Flour", Unit::Kilogram, 1),
                line("Sugar", Unit::Kilogram, 2),
            ]
        );

        Ok(())
    }

    #[tokio::test]
    async fn missing_amount_counts_as_zero() -> anyhow::Result<()> {
        let repository = pantry()
            .recipe("cake", &[("salt", None)])
            .recipe("soup", &[("salt", Some(3))])
            .cart("john", &["cake", "soup"]);
        let aggregator = ShoppingListAggregator::new(repository, GroupingKey::Name);

        assert_eq!(
            aggregator.aggregate("john").await?,
            vec![line("Salt", Unit::Gram, 3)]
        );

        Ok(())
    }

    #[tokio::test]
    async fn output_follows_cart_then_position_order() -> anyhow::Result<()> {
        let mut repository = pantry()
            .recipe("soup", &[("salt", Some(1)), ("flour", Some(1))])
            .recipe("cake", &[("sugar_g", Some(1)), ("salt", Some(1))]);
        repository.carts.insert(
            "john".to_owned(),
            vec![
                CartEntry {
                    recipe_id: "cake".to_owned(),
                    added_at: 20,
                },
                CartEntry {
                    recipe_id: "soup".to_owned(),
                    added_at: 10,
                },
            ],
        );
        let aggregator = ShoppingListAggregator::new(repository, GroupingKey::Name);

        let names = aggregator
            .aggregate("john")
            .await?
            .into_iter()
            .map(|line| line.name)
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["Salt", "Flour", "Sugar"]);

        Ok(())
    }

    #[tokio::test]
    async fn aggregate_is_idempotent() -> anyhow::Result<()> {
        let repository = pantry()
            .recipe("cake", &[("sugar_g", Some(100)), ("flour", Some(1))])
            .recipe("jam", &[("sugar_kg", Some(2))])
            .cart("john", &["cake", "jam"]);
        let aggregator = ShoppingListAggregator::new(repository, GroupingKey::Name);

        let first = aggregator.aggregate("john").await?;
        let second = aggregator.aggregate("john").await?;
        assert_eq!(first, second);

        Ok(())
    }

    #[tokio::test]
    async fn missing_recipe_is_an_integrity_fault() {
        let repository = pantry().cart("john", &["gone"]);
        let aggregator = ShoppingListAggregator::new(repository, GroupingKey::Name);

        let err = aggregator.aggregate("john").await.unwrap_err();
        assert!(matches!(err, recipebox_shared::Error::Integrity(_)));
    }

    #[tokio::test]
    async fn missing_ingredient_is_an_integrity_fault() {
        let repository = pantry()
            .recipe("cake", &[("unknown", Some(1))])
            .cart("john", &["cake"]);
        let aggregator = ShoppingListAggregator::new(repository, GroupingKey::Name);

        let err = aggregator.aggregate("john").await.unwrap_err();
        assert!(matches!(err, recipebox_shared::Error::Integrity(_)));
    }

    #[test]
    fn grouping_key_parses_from_config() {
        use std::str::FromStr;

        assert_eq!(GroupingKey::default(), GroupingKey::Name);
        assert_eq!(
            GroupingKey::from_str("name_and_unit").unwrap(),
            GroupingKey::NameAndUnit
        );
    }
}

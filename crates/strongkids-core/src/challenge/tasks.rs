//! The fixed daily checklist.
//!
//! Five categories, nine items. The shape is nominal: every category is a
//! record with exactly its own fields, so no item can appear or disappear at
//! runtime. String keys only exist at the parsing boundary ([`TaskKey::parse`])
//! and in the serialized snapshot.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A checklist category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Nutrition,
    Movement,
    Learning,
    Responsibility,
    Kindness,
}

impl Category {
    /// All categories in display order.
    pub const ALL: [Category; 5] = [
        Category::Nutrition,
        Category::Movement,
        Category::Learning,
        Category::Responsibility,
        Category::Kindness,
    ];

    /// Snapshot key of the category.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Nutrition => "nutrition",
            Category::Movement => "movement",
            Category::Learning => "learning",
            Category::Responsibility => "responsibility",
            Category::Kindness => "kindness",
        }
    }

    /// Section heading shown to the child.
    pub fn title(self) -> &'static str {
        match self {
            Category::Nutrition => "Nutrition Tasks",
            Category::Movement => "Movement Tasks",
            Category::Learning => "Learning Task",
            Category::Responsibility => "Responsibility Task",
            Category::Kindness => "Kindness Task",
        }
    }

    /// Items belonging to this category, in display order.
    pub fn items(self) -> &'static [TaskKey] {
        match self {
            Category::Nutrition => &[
                TaskKey::Fruits,
                TaskKey::Veggies,
                TaskKey::Water,
                TaskKey::NoSugar,
            ],
            Category::Movement => &[TaskKey::OutsidePlay, TaskKey::Exercise],
            Category::Learning => &[TaskKey::LearningActivity],
            Category::Responsibility => &[TaskKey::ResponsibilityTask],
            Category::Kindness => &[TaskKey::KindnessTask],
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ValidationError::UnknownCategory(s.to_string()))
    }
}

/// One item of the checklist, addressed by category and item key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKey {
    Fruits,
    Veggies,
    Water,
    NoSugar,
    OutsidePlay,
    Exercise,
    LearningActivity,
    ResponsibilityTask,
    KindnessTask,
}

impl TaskKey {
    pub const ALL: [TaskKey; 9] = [
        TaskKey::Fruits,
        TaskKey::Veggies,
        TaskKey::Water,
        TaskKey::NoSugar,
        TaskKey::OutsidePlay,
        TaskKey::Exercise,
        TaskKey::LearningActivity,
        TaskKey::ResponsibilityTask,
        TaskKey::KindnessTask,
    ];

    pub fn category(self) -> Category {
        match self {
            TaskKey::Fruits | TaskKey::Veggies | TaskKey::Water | TaskKey::NoSugar => {
                Category::Nutrition
            }
            TaskKey::OutsidePlay | TaskKey::Exercise => Category::Movement,
            TaskKey::LearningActivity => Category::Learning,
            TaskKey::ResponsibilityTask => Category::Responsibility,
            TaskKey::KindnessTask => Category::Kindness,
        }
    }

    /// Item key within its category, as written in the snapshot.
    pub fn item(self) -> &'static str {
        match self {
            TaskKey::Fruits => "fruits",
            TaskKey::Veggies => "veggies",
            TaskKey::Water => "water",
            TaskKey::NoSugar => "noSugar",
            TaskKey::OutsidePlay => "outsidePlay",
            TaskKey::Exercise => "exercise",
            TaskKey::LearningActivity => "activity",
            TaskKey::ResponsibilityTask | TaskKey::KindnessTask => "task",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TaskKey::Fruits => "Eat 2 fruits",
            TaskKey::Veggies => "Eat 2 vegetables",
            TaskKey::Water => "Drink 6-8 glasses of water",
            TaskKey::NoSugar => "No sugary drinks or candy",
            TaskKey::OutsidePlay => "30 minutes outside play",
            TaskKey::Exercise => "20 minutes exercise/sports",
            TaskKey::LearningActivity => "Complete today's learning activity",
            TaskKey::ResponsibilityTask => "Complete one responsibility task",
            TaskKey::KindnessTask => "Complete one kindness task",
        }
    }

    /// Example ideas shown under the item.
    pub fn ideas(self) -> &'static str {
        match self {
            TaskKey::Fruits => "Apple, Banana, Orange, Berries",
            TaskKey::Veggies => "Carrots, Broccoli, Lettuce, Tomatoes",
            TaskKey::Water => "Tip: Mark each glass on your water bottle!",
            TaskKey::NoSugar => "No soda, candy or cookies (unless it's a special day!)",
            TaskKey::OutsidePlay => "Run, Bike, Skateboard, Sports",
            TaskKey::Exercise => "PE Class, Swimming, Soccer practice",
            TaskKey::LearningActivity => "Read 4 pages, Practice instrument, Extra math practice",
            TaskKey::ResponsibilityTask => {
                "Make bed, Pack school bag, Clean room, Help with dishes"
            }
            TaskKey::KindnessTask => "Help someone, Write a thank you note, Share with others",
        }
    }

    /// Resolve a `category`/`item` pair from user input.
    ///
    /// Matching is case-insensitive so `nosugar` and `noSugar` both work.
    pub fn parse(category: &str, item: &str) -> Result<TaskKey, ValidationError> {
        let category: Category = category.parse()?;
        category
            .items()
            .iter()
            .copied()
            .find(|k| k.item().eq_ignore_ascii_case(item))
            .ok_or_else(|| ValidationError::UnknownItem {
                category: category.as_str().to_string(),
                item: item.to_string(),
                expected: category
                    .items()
                    .iter()
                    .map(|k| k.item())
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }
}

impl fmt::Display for TaskKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.category(), self.item())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NutritionTasks {
    pub fruits: bool,
    pub veggies: bool,
    pub water: bool,
    pub no_sugar: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovementTasks {
    pub outside_play: bool,
    pub exercise: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearningTasks {
    pub activity: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponsibilityTasks {
    pub task: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KindnessTasks {
    pub task: bool,
}

/// Completion flags for the whole checklist.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskBoard {
    pub nutrition: NutritionTasks,
    pub movement: MovementTasks,
    pub learning: LearningTasks,
    pub responsibility: ResponsibilityTasks,
    pub kindness: KindnessTasks,
}

impl TaskBoard {
    pub fn is_done(&self, key: TaskKey) -> bool {
        match key {
            TaskKey::Fruits => self.nutrition.fruits,
            TaskKey::Veggies => self.nutrition.veggies,
            TaskKey::Water => self.nutrition.water,
            TaskKey::NoSugar => self.nutrition.no_sugar,
            TaskKey::OutsidePlay => self.movement.outside_play,
            TaskKey::Exercise => self.movement.exercise,
            TaskKey::LearningActivity => self.learning.activity,
            TaskKey::ResponsibilityTask => self.responsibility.task,
            TaskKey::KindnessTask => self.kindness.task,
        }
    }

    fn flag_mut(&mut self, key: TaskKey) -> &mut bool {
        match key {
            TaskKey::Fruits => &mut self.nutrition.fruits,
            TaskKey::Veggies => &mut self.nutrition.veggies,
            TaskKey::Water => &mut self.nutrition.water,
            TaskKey::NoSugar => &mut self.nutrition.no_sugar,
            TaskKey::OutsidePlay => &mut self.movement.outside_play,
            TaskKey::Exercise => &mut self.movement.exercise,
            TaskKey::LearningActivity => &mut self.learning.activity,
            TaskKey::ResponsibilityTask => &mut self.responsibility.task,
            TaskKey::KindnessTask => &mut self.kindness.task,
        }
    }

    /// Copy of the board with `key` flipped.
    #[must_use]
    pub fn toggled(mut self, key: TaskKey) -> Self {
        let flag = self.flag_mut(key);
        *flag = !*flag;
        self
    }

    /// Copy of the board with `key` set to `done`.
    #[must_use]
    pub fn with(mut self, key: TaskKey, done: bool) -> Self {
        *self.flag_mut(key) = done;
        self
    }

    /// Board with every item done.
    pub fn all_done() -> Self {
        TaskKey::ALL
            .into_iter()
            .fold(Self::default(), |board, key| board.with(key, true))
    }

    /// True iff every item of every category is done.
    pub fn is_complete(&self) -> bool {
        TaskKey::ALL.iter().all(|&k| self.is_done(k))
    }

    pub fn is_category_complete(&self, category: Category) -> bool {
        category.items().iter().all(|&k| self.is_done(k))
    }

    pub fn completed_count(&self) -> usize {
        TaskKey::ALL.iter().filter(|&&k| self.is_done(k)).count()
    }

    pub fn total_count(&self) -> usize {
        TaskKey::ALL.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_key_belongs_to_its_category_list() {
        for key in TaskKey::ALL {
            assert!(key.category().items().contains(&key), "{key}");
        }
        let listed: usize = Category::ALL.iter().map(|c| c.items().len()).sum();
        assert_eq!(listed, TaskKey::ALL.len());
    }

    #[test]
    fn parse_accepts_snapshot_keys() {
        assert_eq!(TaskKey::parse("nutrition", "noSugar"), Ok(TaskKey::NoSugar));
        assert_eq!(TaskKey::parse("Movement", "outsideplay"), Ok(TaskKey::OutsidePlay));
        assert_eq!(TaskKey::parse("kindness", "task"), Ok(TaskKey::KindnessTask));
        assert_eq!(
            TaskKey::parse("responsibility", "task"),
            Ok(TaskKey::ResponsibilityTask)
        );
    }

    #[test]
    fn parse_rejects_outside_schema() {
        assert_eq!(
            TaskKey::parse("sleep", "nap"),
            Err(ValidationError::UnknownCategory("sleep".into()))
        );
        match TaskKey::parse("learning", "task") {
            Err(ValidationError::UnknownItem { expected, .. }) => assert_eq!(expected, "activity"),
            other => panic!("expected UnknownItem, got {other:?}"),
        }
    }

    #[test]
    fn toggled_flips_only_one_flag() {
        let board = TaskBoard::default().toggled(TaskKey::Water);
        assert!(board.is_done(TaskKey::Water));
        assert_eq!(board.completed_count(), 1);
        assert_eq!(board.toggled(TaskKey::Water), TaskBoard::default());
    }

    #[test]
    fn completion_requires_every_item() {
        assert!(TaskBoard::all_done().is_complete());
        for key in TaskKey::ALL {
            assert!(!TaskBoard::all_done().with(key, false).is_complete(), "{key}");
        }
        assert!(!TaskBoard::default().is_complete());
    }

    #[test]
    fn category_completion() {
        let board = TaskBoard::default()
            .with(TaskKey::OutsidePlay, true)
            .with(TaskKey::Exercise, true);
        assert!(board.is_category_complete(Category::Movement));
        assert!(!board.is_category_complete(Category::Nutrition));
    }

    #[test]
    fn serializes_with_camel_case_item_keys() {
        let json = serde_json::to_value(TaskBoard::default().with(TaskKey::NoSugar, true)).unwrap();
        assert_eq!(json["nutrition"]["noSugar"], serde_json::Value::Bool(true));
        assert_eq!(json["movement"]["outsidePlay"], serde_json::Value::Bool(false));
        assert_eq!(json["kindness"]["task"], serde_json::Value::Bool(false));
    }
}

use anyhow::Result;

use super::Tool;

/// Breed name (lower case) and the fact reported for it
const BREED_WEIGHTS: &[(&str, &str)] = &[
    ("scottish terrier", "Scottish Terriers average 20 lbs"),
    ("border collie", "a Border Collies average weight is 37 lbs"),
    ("toy poodle", "a toy poodles average weight is 7 lbs"),
    ("bulldog", "a Bulldog weights 51 lbs"),
];

/// Look up the average weight of a breed. Matching ignores case and
/// surrounding or repeated whitespace; unknown breeds get a fixed reply.
pub fn average_dog_weight(breed: &str) -> String {
    let key = breed.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase();
    BREED_WEIGHTS
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, fact)| fact.to_string())
        .unwrap_or_else(|| format!("I don't know the average weight of a {}", breed.trim()))
}

/// The `average_dog_weight` action
#[derive(Debug, Clone, Copy, Default)]
pub struct DogWeight;

impl Tool for DogWeight {
    fn name(&self) -> &str {
        "average_dog_weight"
    }

    fn description(&self) -> &str {
        "Returns the average weight of a dog when given the breed"
    }

    fn example(&self) -> &str {
        "Collie"
    }

    fn invoke(&self, argument: &str) -> Result<String> {
        Ok(average_dog_weight(argument))
    }
}

use crate::core::errors::FinanceError;

/// bcrypt with a configurable work factor.
#[derive(Clone, Copy, Debug)]
pub struct PasswordHasher {
    cost: u32,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        PasswordHasher {
            cost: bcrypt::DEFAULT_COST,
        }
    }
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        PasswordHasher { cost }
    }

    pub fn hash(&self, password: &str) -> Result<String, FinanceError> {
        bcrypt::hash(password, self.cost)
            .map_err(|e| FinanceError::InternalServerError(format!("Password hashing error: {}", e)))
    }

    /// A malformed stored hash counts as a mismatch.
    pub fn verify(&self, password: &str, hashed: &str) -> bool {
        bcrypt::verify(password, hashed).unwrap_or(false)
    }
}

//! The operator trait, the built-in syntactic operators, and the registry
//! that filters and orders them.

mod arithmetic;
mod boolean;
mod comparison;
mod literal;
pub mod source_pattern;

use crate::error::LeanMutatorError;
use crate::parser::Node;

/// A named, pure mutation operator over parsed syntax nodes.
///
/// `can_mutate` is a predicate; `mutate` returns every replacement this
/// operator would propose for a node it matched, each paired with a
/// human-readable description. Implementations must never return a
/// replacement whose pretty-printed text equals the node's own text.
pub trait MutationOperator: Send + Sync {
    /// Stable identifier used for filtering and reporting.
    fn name(&self) -> &'static str;
    /// One-line description, shown by `list-operators`.
    fn description(&self) -> &'static str;
    /// Whether this operator has something to propose for `node`.
    fn can_mutate(&self, node: &Node) -> bool;
    /// The replacements this operator proposes for `node`, in a stable
    /// order. Only called when `can_mutate(node)` is true.
    fn mutate(&self, node: &Node) -> Vec<(Node, String)>;
}

/// Ordered collection of operators, built once at startup.
#[derive(Default)]
pub struct OperatorRegistry {
    operators: Vec<Box<dyn MutationOperator>>,
}

impl std::fmt::Debug for OperatorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OperatorRegistry")
            .field("operators", &self.operators.iter().map(|op| op.name()).collect::<Vec<_>>())
            .finish()
    }
}

impl OperatorRegistry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with every built-in operator registered in the fixed
    /// order the traversal documentation specifies.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(boolean::BooleanFlip));
        registry.register(Box::new(boolean::BooleanAndOr));
        registry.register(Box::new(boolean::BooleanNegationRemoval));
        registry.register(Box::new(arithmetic::ArithmeticAddSub));
        registry.register(Box::new(arithmetic::ArithmeticMulDiv));
        registry.register(Box::new(arithmetic::ArithmeticSwap));
        registry.register(Box::new(arithmetic::NumericBoundary));
        registry.register(Box::new(comparison::ComparisonEquality));
        registry.register(Box::new(comparison::ComparisonRelational));
        registry.register(Box::new(comparison::ComparisonBoundary));
        registry.register(Box::new(literal::StringLiteral));
        registry.register(Box::new(literal::CharLiteral));
        registry
    }

    /// Register an operator. An existing operator with the same name is
    /// displaced — last-registered wins.
    pub fn register(&mut self, operator: Box<dyn MutationOperator>) {
        self.operators.retain(|existing| existing.name() != operator.name());
        self.operators.push(operator);
    }

    /// Every registered operator, in registration order.
    #[must_use]
    pub fn all(&self) -> &[Box<dyn MutationOperator>] {
        &self.operators
    }

    /// Select operators by name. An empty list selects all. Every name must
    /// match a registered operator, or the request is a user-input error.
    pub fn get_by_names(&self, names: &[String]) -> Result<Vec<&dyn MutationOperator>, LeanMutatorError> {
        if names.is_empty() {
            return Ok(self.operators.iter().map(std::convert::AsRef::as_ref).collect());
        }
        for name in names {
            if !self.operators.iter().any(|op| op.name() == name) {
                return Err(LeanMutatorError::UnknownOperator(name.clone()));
            }
        }
        Ok(self
            .operators
            .iter()
            .filter(|op| names.iter().any(|n| n == op.name()))
            .map(std::convert::AsRef::as_ref)
            .collect())
    }
}

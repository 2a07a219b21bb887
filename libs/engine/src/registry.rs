//! Method registry: the single composition root
//!
//! Builds every method from an [`EngineConfig`] and answers lookups by
//! operation and method id. Lookups never fail loudly; unknown operations or
//! ids yield `None` or an empty list.

use crate::addition::{CarryLookaheadAddition, KahanSummation, StandardAddition};
use crate::division::{
    LongDivision, NewtonRaphsonDivision, NonRestoringDivision, SyntheticDivision, VedicParavartya,
};
use crate::method::CalculationMethod;
use crate::multiplication::{
    AbacusMultiplication, GradeSchoolMultiplication, KaratsubaMultiplication,
    LatticeMultiplication, RussianPeasantMultiplication, VedicEkadhikena, VedicNikhilam,
    VedicUrdhvaTiryak,
};
use crate::subtraction::{StandardSubtraction, TwosComplementSubtraction};
use ganita_config::EngineConfig;
use ganita_types::{FinalAnswer, MethodMetadata, Operands, Operation};
use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, info};

static DEFAULT_REGISTRY: Lazy<Registry> = Lazy::new(|| Registry::new(&EngineConfig::default()));

/// Process-wide registry built from the default configuration
pub fn default_registry() -> &'static Registry {
    &DEFAULT_REGISTRY
}

/// Outcome of one method in a [`Registry::compare`] run
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Comparison {
    pub method: &'static str,
    pub method_name: &'static str,
    pub answer: Option<FinalAnswer>,
    pub error: Option<String>,
    pub verified: bool,
    pub step_count: usize,
}

/// Every calculation method, grouped by operation
pub struct Registry {
    methods: BTreeMap<Operation, Vec<Box<dyn CalculationMethod>>>,
}

impl Registry {
    pub fn new(config: &EngineConfig) -> Self {
        let mut methods: BTreeMap<Operation, Vec<Box<dyn CalculationMethod>>> = BTreeMap::new();

        methods.insert(
            Operation::Addition,
            vec![
                Box::new(StandardAddition::new()),
                Box::new(CarryLookaheadAddition::new()),
                Box::new(KahanSummation::new(config.kahan.tolerance)),
            ],
        );
        methods.insert(
            Operation::Subtraction,
            vec![
                Box::new(StandardSubtraction::new()),
                Box::new(TwosComplementSubtraction::new(&config.twos_complement)),
            ],
        );
        methods.insert(
            Operation::Multiplication,
            vec![
                Box::new(GradeSchoolMultiplication::new()),
                Box::new(VedicNikhilam::new(&config.vedic)),
                Box::new(VedicUrdhvaTiryak::new()),
                Box::new(VedicEkadhikena::new()),
                Box::new(LatticeMultiplication::new()),
                Box::new(RussianPeasantMultiplication::new()),
                Box::new(AbacusMultiplication::new()),
                Box::new(KaratsubaMultiplication::new()),
            ],
        );
        methods.insert(
            Operation::Division,
            vec![
                Box::new(LongDivision::new()),
                Box::new(VedicParavartya::new(&config.vedic)),
                Box::new(SyntheticDivision::new()),
                Box::new(NonRestoringDivision::new(&config.non_restoring)),
                Box::new(NewtonRaphsonDivision::new(&config.newton_raphson)),
            ],
        );

        for list in methods.values_mut() {
            list.sort_by_key(|m| m.metadata().display_order);
        }
        let total: usize = methods.values().map(Vec::len).sum();
        info!(methods = total, "Method registry initialized");

        Self { methods }
    }

    pub fn get_method(&self, operation: Operation, id: &str) -> Option<&dyn CalculationMethod> {
        self.methods
            .get(&operation)?
            .iter()
            .find(|m| m.id() == id)
            .map(|m| m.as_ref())
    }

    /// Lookup by operation name; unknown names yield `None`
    pub fn get_method_by_name(&self, operation: &str, id: &str) -> Option<&dyn CalculationMethod> {
        let operation = operation.parse::<Operation>().ok()?;
        self.get_method(operation, id)
    }

    pub fn get_all_methods(&self, operation: Operation) -> Vec<&dyn CalculationMethod> {
        self.methods
            .get(&operation)
            .map(|list| list.iter().map(|m| m.as_ref()).collect())
            .unwrap_or_default()
    }

    /// Metadata of every method for `operation`, sorted by display order
    pub fn get_method_list(&self, operation: Operation) -> Vec<&'static MethodMetadata> {
        let mut list: Vec<&'static MethodMetadata> = self
            .get_all_methods(operation)
            .into_iter()
            .map(|m| m.metadata())
            .collect();
        list.sort_by_key(|meta| meta.display_order);
        list
    }

    /// Run every method of `operation` on the same operands
    ///
    /// Methods that reject the operands report the error instead of an
    /// answer; the run itself never fails.
    pub fn compare(&self, operation: Operation, operands: &Operands) -> Vec<Comparison> {
        debug!(%operation, %operands, "Comparing methods");
        self.get_all_methods(operation)
            .into_iter()
            .map(|method| {
                let meta = method.metadata();
                match method.calculate(operands) {
                    Ok(result) => Comparison {
                        method: meta.id,
                        method_name: meta.name,
                        verified: result.is_verified(),
                        step_count: result.steps.len(),
                        answer: Some(result.final_answer),
                        error: None,
                    },
                    Err(err) => Comparison {
                        method: meta.id,
                        method_name: meta.name,
                        answer: None,
                        error: Some(err.to_string()),
                        verified: false,
                        step_count: 0,
                    },
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ganita_config::OverflowMode;

    #[test]
    fn test_every_operation_populated() {
        let registry = Registry::new(&EngineConfig::default());
        let counts: Vec<usize> = Operation::ALL
            .iter()
            .map(|op| registry.get_all_methods(*op).len())
            .collect();
        assert_eq!(counts, vec![3, 2, 8, 5]);
    }

    #[test]
    fn test_method_list_sorted() {
        let registry = Registry::new(&EngineConfig::default());
        for operation in Operation::ALL {
            let list = registry.get_method_list(operation);
            assert!(list.windows(2).all(|w| w[0].display_order < w[1].display_order));
            assert!(list.iter().all(|meta| meta.operation == operation));
        }
        let ids: Vec<&str> = registry
            .get_method_list(Operation::Division)
            .iter()
            .map(|meta| meta.id)
            .collect();
        assert_eq!(
            ids,
            vec!["long-division", "vedic-paravartya", "synthetic", "non-restoring", "newton-raphson"]
        );
    }

    #[test]
    fn test_unknown_lookups_yield_none() {
        let registry = Registry::new(&EngineConfig::default());
        assert!(registry.get_method(Operation::Addition, "karatsuba").is_none());
        assert!(registry.get_method_by_name("exponentiation", "standard").is_none());
        assert!(registry.get_method_by_name("multiplication", "karatsuba").is_some());
    }

    #[test]
    fn test_standard_id_is_scoped_by_operation() {
        let registry = Registry::new(&EngineConfig::default());
        let add = registry.get_method(Operation::Addition, "standard").unwrap();
        let sub = registry.get_method(Operation::Subtraction, "standard").unwrap();
        assert_eq!(add.metadata().operation, Operation::Addition);
        assert_eq!(sub.metadata().operation, Operation::Subtraction);
    }

    #[test]
    fn test_config_reaches_methods() {
        let mut config = EngineConfig::default();
        config.twos_complement.bit_width = 16;
        config.twos_complement.overflow = OverflowMode::Reject;
        let registry = Registry::new(&config);
        let method = registry
            .get_method(Operation::Subtraction, "twos-complement")
            .unwrap();
        let result = method.calculate(&Operands::pair(-120, 100)).unwrap();
        assert_eq!(result.final_answer, FinalAnswer::integer(-220));
    }

    #[test]
    fn test_compare_reports_errors_per_method() {
        let registry = Registry::new(&EngineConfig::default());
        let rows = registry.compare(Operation::Multiplication, &Operands::pair(24, 24));
        assert_eq!(rows.len(), 8);
        let ekadhikena = rows.iter().find(|r| r.method == "vedic-ekadhikena").unwrap();
        assert!(ekadhikena.answer.is_none());
        assert!(ekadhikena.error.is_some());
        assert!(rows
            .iter()
            .filter(|r| r.method != "vedic-ekadhikena")
            .all(|r| r.verified && r.answer == Some(FinalAnswer::integer(576))));
    }

    #[test]
    fn test_default_registry_is_shared() {
        assert!(std::ptr::eq(default_registry(), default_registry()));
    }
}

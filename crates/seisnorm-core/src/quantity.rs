use seisnorm_canonical::{Quantity, QuantityErrors};

use crate::document::{NodeValue, RecordNode};

/// Reads a value + uncertainty element.
///
/// Looks up the `path` element below `node` and reads its `value`,
/// `uncertainty`, `lowerUncertainty`, `upperUncertainty` and
/// `confidenceLevel` children independently. A missing element yields an
/// empty quantity; this never fails.
pub fn read_quantity<N, T>(node: &N, path: &str) -> Quantity<T>
where
    N: RecordNode,
    T: NodeValue,
{
    let Some(element) = node.first(path) else {
        return Quantity::default();
    };

    Quantity {
        value: element.read("value"),
        errors: QuantityErrors {
            uncertainty: element.read("uncertainty"),
            lower_uncertainty: element.read("lowerUncertainty"),
            upper_uncertainty: element.read("upperUncertainty"),
            confidence_level: element.read("confidenceLevel"),
        },
    }
}

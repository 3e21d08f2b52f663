//! `SArray`: a shaped numeric array with optional per-dimension names.
//!
//! Every data input, initial-value input, and monitor dump in the
//! public runtime API (§6) is an `SArray`.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Shape {
    dims: Vec<usize>,
}

impl Shape {
    pub fn new(dims: Vec<usize>) -> Self {
        Shape { dims }
    }

    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    pub fn size(&self) -> usize {
        self.dims.iter().product()
    }

    pub fn rank(&self) -> usize {
        self.dims.len()
    }

    pub fn is_scalar(&self) -> bool {
        self.dims.iter().all(|&d| d == 1)
    }
}

impl From<Vec<usize>> for Shape {
    fn from(dims: Vec<usize>) -> Self {
        Shape::new(dims)
    }
}

impl From<usize> for Shape {
    fn from(n: usize) -> Self {
        Shape::new(vec![n])
    }
}

/// A numeric array bundling a shape, a flat row-major value vector, and
/// optional per-dimension names (e.g. `"iteration"` for a monitor dump).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SArray {
    shape: Shape,
    values: Vec<f64>,
    dim_names: Option<Vec<String>>,
}

impl SArray {
    pub fn new(shape: impl Into<Shape>, values: Vec<f64>) -> Self {
        let shape = shape.into();
        assert_eq!(
            shape.size(),
            values.len(),
            "SArray value count {} does not match shape {:?}",
            values.len(),
            shape.dims(),
        );
        Self {
            shape,
            values,
            dim_names: None,
        }
    }

    pub fn scalar(value: f64) -> Self {
        Self::new(Shape::new(vec![1]), vec![value])
    }

    pub fn with_dim_names(mut self, names: Vec<String>) -> Self {
        assert_eq!(names.len(), self.shape.rank());
        self.dim_names = Some(names);
        self
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn dim_names(&self) -> Option<&[String]> {
        self.dim_names.as_deref()
    }

    pub fn set_values(&mut self, values: Vec<f64>) {
        assert_eq!(self.shape.size(), values.len());
        self.values = values;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_size_is_product_of_dims() {
        let shape = Shape::new(vec![2, 3, 4]);
        assert_eq!(shape.size(), 24);
    }

    #[test]
    #[should_panic]
    fn mismatched_value_count_panics() {
        let _ = SArray::new(Shape::new(vec![2, 2]), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn dim_names_attach_by_axis() {
        let arr = SArray::new(Shape::new(vec![3]), vec![1.0, 2.0, 3.0])
            .with_dim_names(vec!["iteration".to_string()]);
        assert_eq!(arr.dim_names(), Some(&["iteration".to_string()][..]));
    }
}

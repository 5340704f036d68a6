use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, Copy, Eq, PartialEq, Fromln, AsRefln)]
pub struct PublicationYear(i32);

impl PublicationYear {
    pub fn new(year: impl Into<i32>) -> Self {
        Self(year.into())
    }
}

//! Clinic domain: the owner aggregate, vets, and the rules applied to forms.

pub mod identity;
pub mod owner;
pub mod pagination;
pub mod pet;
pub mod validation;
pub mod vet;
pub mod visit;

pub use identity::{EntityId, Person};
pub use owner::{Owner, OwnerError};
pub use pagination::{Page, PageRequest, Pagination, PAGE_SIZE};
pub use pet::{Pet, PetType};
pub use vet::{Specialty, Vet, Vets};
pub use visit::Visit;

pub mod owner;
pub mod pet;
pub mod pet_type;
pub mod specialty;
pub mod vet;
pub mod vet_specialty;
pub mod visit;

pub use owner::Entity as Owner;
pub use pet::Entity as Pet;
pub use pet_type::Entity as PetType;
pub use specialty::Entity as Specialty;
pub use vet::Entity as Vet;
pub use vet_specialty::Entity as VetSpecialty;
pub use visit::Entity as Visit;

pub mod prelude;

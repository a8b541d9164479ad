use chrono::NaiveDate;
use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::{ConnectionTrait, DatabaseBackend};

use super::m20260101_000001_create_clinic_tables::{
    Owners, Pets, Specialties, Types, VetSpecialties, Vets, Visits,
};

const VETS: &[(i32, &str, &str)] = &[
    (1, "James", "Carter"),
    (2, "Helen", "Leary"),
    (3, "Linda", "Douglas"),
    (4, "Rafael", "Ortega"),
    (5, "Henry", "Stevens"),
    (6, "Sharon", "Jenkins"),
];

const SPECIALTIES: &[(i32, &str)] = &[(1, "radiology"), (2, "surgery"), (3, "dentistry")];

// (vet_id, specialty_id)
const VET_SPECIALTIES: &[(i32, i32)] = &[(2, 1), (3, 2), (3, 3), (4, 2), (5, 1)];

const TYPES: &[(i32, &str)] = &[
    (1, "cat"),
    (2, "dog"),
    (3, "lizard"),
    (4, "snake"),
    (5, "bird"),
    (6, "hamster"),
];

const OWNERS: &[(i32, &str, &str, &str, &str, &str)] = &[
    (1, "George", "Franklin", "110 W. Liberty St.", "Madison", "6085551023"),
    (2, "Betty", "Davis", "638 Cardinal Ave.", "Sun Prairie", "6085551749"),
    (3, "Eduardo", "Rodriquez", "2693 Commerce St.", "McFarland", "6085558763"),
    (4, "Harold", "Davis", "563 Friendly St.", "Windsor", "6085553198"),
    (5, "Peter", "McTavish", "2387 S. Fair Way", "Madison", "6085552765"),
    (6, "Jean", "Coleman", "105 N. Lake St.", "Monona", "6085552654"),
    (7, "Jeff", "Black", "1450 Oak Blvd.", "Monona", "6085555387"),
    (8, "Maria", "Escobito", "345 Maple St.", "Madison", "6085557683"),
    (9, "David", "Schroeder", "2749 Blackhawk Trail", "Madison", "6085559435"),
    (10, "Carlos", "Estaban", "2335 Independence La.", "Waunakee", "6085555487"),
];

// (id, name, birth_date, type_id, owner_id)
const PETS: &[(i32, &str, &str, i32, i32)] = &[
    (1, "Leo", "2010-09-07", 1, 1),
    (2, "Basil", "2012-08-06", 6, 2),
    (3, "Rosy", "2011-04-17", 2, 3),
    (4, "Jewel", "2010-03-07", 2, 3),
    (5, "Iggy", "2010-11-30", 3, 4),
    (6, "George", "2010-01-20", 4, 5),
    (7, "Samantha", "2012-09-04", 1, 6),
    (8, "Max", "2012-09-04", 1, 6),
    (9, "Lucky", "2011-08-06", 5, 7),
    (10, "Mulligan", "2007-02-24", 2, 8),
    (11, "Freddy", "2010-03-09", 5, 9),
    (12, "Lucky", "2010-06-24", 2, 10),
    (13, "Sly", "2012-06-08", 1, 10),
];

// (id, pet_id, visit_date, description)
const VISITS: &[(i32, i32, &str, &str)] = &[
    (1, 7, "2013-01-01", "rabies shot"),
    (2, 8, "2013-01-02", "rabies shot"),
    (3, 8, "2013-01-03", "neutered"),
    (4, 7, "2013-01-04", "spayed"),
];

fn date(value: &str) -> Result<NaiveDate, DbErr> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| DbErr::Migration(format!("bad seed date {value}: {e}")))
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let mut specialties = Query::insert();
        specialties
            .into_table(Specialties::Table)
            .columns([Specialties::Id, Specialties::Name]);
        for (id, name) in SPECIALTIES {
            specialties.values_panic([(*id).into(), (*name).into()]);
        }
        manager.exec_stmt(specialties).await?;

        let mut vets = Query::insert();
        vets.into_table(Vets::Table)
            .columns([Vets::Id, Vets::FirstName, Vets::LastName]);
        for (id, first_name, last_name) in VETS {
            vets.values_panic([(*id).into(), (*first_name).into(), (*last_name).into()]);
        }
        manager.exec_stmt(vets).await?;

        let mut vet_specialties = Query::insert();
        vet_specialties
            .into_table(VetSpecialties::Table)
            .columns([VetSpecialties::VetId, VetSpecialties::SpecialtyId]);
        for (vet_id, specialty_id) in VET_SPECIALTIES {
            vet_specialties.values_panic([(*vet_id).into(), (*specialty_id).into()]);
        }
        manager.exec_stmt(vet_specialties).await?;

        let mut types = Query::insert();
        types.into_table(Types::Table).columns([Types::Id, Types::Name]);
        for (id, name) in TYPES {
            types.values_panic([(*id).into(), (*name).into()]);
        }
        manager.exec_stmt(types).await?;

        let mut owners = Query::insert();
        owners.into_table(Owners::Table).columns([
            Owners::Id,
            Owners::FirstName,
            Owners::LastName,
            Owners::Address,
            Owners::City,
            Owners::Telephone,
        ]);
        for (id, first_name, last_name, address, city, telephone) in OWNERS {
            owners.values_panic([
                (*id).into(),
                (*first_name).into(),
                (*last_name).into(),
                (*address).into(),
                (*city).into(),
                (*telephone).into(),
            ]);
        }
        manager.exec_stmt(owners).await?;

        let mut pets = Query::insert();
        pets.into_table(Pets::Table).columns([
            Pets::Id,
            Pets::Name,
            Pets::BirthDate,
            Pets::TypeId,
            Pets::OwnerId,
        ]);
        for (id, name, birth_date, type_id, owner_id) in PETS {
            pets.values_panic([
                (*id).into(),
                (*name).into(),
                date(birth_date)?.into(),
                (*type_id).into(),
                (*owner_id).into(),
            ]);
        }
        manager.exec_stmt(pets).await?;

        let mut visits = Query::insert();
        visits.into_table(Visits::Table).columns([
            Visits::Id,
            Visits::PetId,
            Visits::VisitDate,
            Visits::Description,
        ]);
        for (id, pet_id, visit_date, description) in VISITS {
            visits.values_panic([
                (*id).into(),
                (*pet_id).into(),
                date(visit_date)?.into(),
                (*description).into(),
            ]);
        }
        manager.exec_stmt(visits).await?;

        // Explicit ids leave Postgres sequences behind the data.
        if manager.get_database_backend() == DatabaseBackend::Postgres {
            let db = manager.get_connection();
            for table in ["specialties", "vets", "types", "owners", "pets", "visits"] {
                db.execute_unprepared(&format!(
                    "SELECT setval(pg_get_serial_sequence('{table}', 'id'), (SELECT MAX(id) FROM {table}))"
                ))
                .await?;
            }
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .exec_stmt(Query::delete().from_table(Visits::Table).to_owned())
            .await?;
        manager
            .exec_stmt(Query::delete().from_table(Pets::Table).to_owned())
            .await?;
        manager
            .exec_stmt(Query::delete().from_table(Owners::Table).to_owned())
            .await?;
        manager
            .exec_stmt(Query::delete().from_table(Types::Table).to_owned())
            .await?;
        manager
            .exec_stmt(Query::delete().from_table(VetSpecialties::Table).to_owned())
            .await?;
        manager
            .exec_stmt(Query::delete().from_table(Vets::Table).to_owned())
            .await?;
        manager
            .exec_stmt(Query::delete().from_table(Specialties::Table).to_owned())
            .await
    }
}

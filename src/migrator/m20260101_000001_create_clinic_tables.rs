use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Reference data
        manager
            .create_table(
                Table::create()
                    .table(Types::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Types::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Types::Name).string_len(80).not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Specialties::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Specialties::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Specialties::Name).string_len(80).not_null())
                    .to_owned(),
            )
            .await?;

        // Vets
        manager
            .create_table(
                Table::create()
                    .table(Vets::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Vets::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Vets::FirstName).string_len(30).not_null())
                    .col(ColumnDef::new(Vets::LastName).string_len(30).not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(VetSpecialties::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(VetSpecialties::VetId).integer().not_null())
                    .col(ColumnDef::new(VetSpecialties::SpecialtyId).integer().not_null())
                    .primary_key(
                        Index::create()
                            .col(VetSpecialties::VetId)
                            .col(VetSpecialties::SpecialtyId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-vet_specialties-vet_id")
                            .from(VetSpecialties::Table, VetSpecialties::VetId)
                            .to(Vets::Table, Vets::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-vet_specialties-specialty_id")
                            .from(VetSpecialties::Table, VetSpecialties::SpecialtyId)
                            .to(Specialties::Table, Specialties::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Owners -> Pets -> Visits
        manager
            .create_table(
                Table::create()
                    .table(Owners::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Owners::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Owners::FirstName).string_len(30).not_null())
                    .col(ColumnDef::new(Owners::LastName).string_len(30).not_null())
                    .col(ColumnDef::new(Owners::Address).string_len(255).not_null())
                    .col(ColumnDef::new(Owners::City).string_len(80).not_null())
                    .col(ColumnDef::new(Owners::Telephone).string_len(20).not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_owners_last_name")
                    .table(Owners::Table)
                    .col(Owners::LastName)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Pets::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Pets::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Pets::Name).string_len(30).not_null())
                    .col(ColumnDef::new(Pets::BirthDate).date())
                    .col(ColumnDef::new(Pets::TypeId).integer().not_null())
                    .col(ColumnDef::new(Pets::OwnerId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-pets-owner_id")
                            .from(Pets::Table, Pets::OwnerId)
                            .to(Owners::Table, Owners::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-pets-type_id")
                            .from(Pets::Table, Pets::TypeId)
                            .to(Types::Table, Types::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_pets_owner_id")
                    .table(Pets::Table)
                    .col(Pets::OwnerId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Visits::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Visits::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Visits::PetId).integer().not_null())
                    .col(ColumnDef::new(Visits::VisitDate).date().not_null())
                    .col(ColumnDef::new(Visits::Description).string_len(255).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-visits-pet_id")
                            .from(Visits::Table, Visits::PetId)
                            .to(Pets::Table, Pets::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_visits_pet_id")
                    .table(Visits::Table)
                    .col(Visits::PetId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Visits::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Pets::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Owners::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(VetSpecialties::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Vets::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Specialties::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Types::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub(super) enum Types {
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
pub(super) enum Specialties {
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
pub(super) enum Vets {
    Table,
    Id,
    FirstName,
    LastName,
}

#[derive(DeriveIden)]
pub(super) enum VetSpecialties {
    Table,
    VetId,
    SpecialtyId,
}

#[derive(DeriveIden)]
pub(super) enum Owners {
    Table,
    Id,
    FirstName,
    LastName,
    Address,
    City,
    Telephone,
}

#[derive(DeriveIden)]
pub(super) enum Pets {
    Table,
    Id,
    Name,
    BirthDate,
    TypeId,
    OwnerId,
}

#[derive(DeriveIden)]
pub(super) enum Visits {
    Table,
    Id,
    PetId,
    VisitDate,
    Description,
}

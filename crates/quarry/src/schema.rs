use crate::{model::short_name, Db, Model, Result};

/// Create the bases and instances `M` declares that the store lacks.
pub(crate) fn install_fields<M: Model>(db: &Db) -> Result<()> {
    let Some(bundle) = M::BUNDLE else {
        return Ok(());
    };

    let declared = M::fields();
    let driver = db.driver();

    let existing = driver.field_base_definitions()?;
    for base in declared.bases() {
        if !existing.iter().any(|e| e.field_name == base.field_name) {
            tracing::debug!(model = short_name::<M>(), field = %base.field_name, "quarry.create_field");
            driver.create_field(base)?;
        }
    }

    let existing = driver.field_instance_definitions(M::ENTITY_TYPE, bundle)?;
    for instance in declared.instances() {
        if !instance.is_attached_to(M::ENTITY_TYPE, bundle) {
            continue;
        }

        if !existing.iter().any(|e| e.field_name == instance.field_name) {
            tracing::debug!(
                model = short_name::<M>(),
                field = %instance.field_name,
                "quarry.create_field_instance"
            );
            driver.create_field_instance(instance)?;
        }
    }

    db.forget_field_catalog::<M>();
    Ok(())
}

/// Delete the instances `M` declares that the store has. Bases are left in
/// place.
pub(crate) fn uninstall_fields<M: Model>(db: &Db) -> Result<()> {
    let Some(bundle) = M::BUNDLE else {
        return Ok(());
    };

    let driver = db.driver();
    let existing = driver.field_instance_definitions(M::ENTITY_TYPE, bundle)?;

    for instance in M::fields().instances() {
        if existing.iter().any(|e| {
            e.field_name == instance.field_name && e.is_attached_to(M::ENTITY_TYPE, bundle)
        }) {
            tracing::debug!(
                model = short_name::<M>(),
                field = %instance.field_name,
                "quarry.delete_field_instance"
            );
            driver.delete_field_instance(instance)?;
        }
    }

    db.forget_field_catalog::<M>();
    Ok(())
}

//! Medical certificate operations.

use super::{check_version, MedicalService, ServiceError, ServiceResult};
use crate::db::{Database, NamedQuery};
use crate::models::MedicalCertificate;

impl MedicalService<'_> {
    pub fn all_medical_certificates(&self) -> ServiceResult<Vec<MedicalCertificate>> {
        tracing::debug!("all_medical_certificates");
        Ok(self.db.get_all(NamedQuery::MedicalCertificateFindAll)?)
    }

    pub fn medical_certificate_by_id(&self, id: i64) -> ServiceResult<Option<MedicalCertificate>> {
        tracing::debug!(id, "medical_certificate_by_id");
        Ok(self.db.get_by_id(NamedQuery::MedicalCertificateFindById, id)?)
    }

    /// Persist a certificate. Owner and training must exist and the training
    /// must not be certified already.
    pub fn create_medical_certificate(
        &self,
        certificate: MedicalCertificate,
    ) -> ServiceResult<MedicalCertificate> {
        let id = self.db.unit_of_work(|db| -> ServiceResult<i64> {
            let training_id = certificate.training_id.ok_or_else(|| {
                ServiceError::Precondition("a certificate needs a training".into())
            })?;
            require_links(db, training_id, certificate.owner_id, None)?;

            let fresh =
                MedicalCertificate::new(training_id, certificate.owner_id, certificate.signed);
            Ok(db.insert_medical_certificate(&fresh)?)
        })?;

        tracing::info!(id, "medical certificate created");
        self.medical_certificate_by_id(id)?.ok_or_else(|| {
            ServiceError::Lookup(format!("medical certificate {} vanished after insert", id))
        })
    }

    /// Replace training link, owner and signed flag.
    pub fn update_medical_certificate(
        &self,
        id: i64,
        changes: MedicalCertificate,
    ) -> ServiceResult<Option<MedicalCertificate>> {
        let updated = self.db.unit_of_work(|db| -> ServiceResult<bool> {
            let Some(mut current) =
                db.get_by_id::<MedicalCertificate>(NamedQuery::MedicalCertificateFindById, id)?
            else {
                return Ok(false);
            };
            check_version("medical certificate", changes.version, current.version)?;

            let training_id = changes.training_id.ok_or_else(|| {
                ServiceError::Precondition("a certificate needs a training".into())
            })?;
            require_links(db, training_id, changes.owner_id, Some(id))?;

            current.training_id = Some(training_id);
            current.owner_id = changes.owner_id;
            current.signed = changes.signed;
            Ok(db.update_medical_certificate(&current)?)
        })?;

        if !updated {
            tracing::warn!(id, "update of missing medical certificate");
            return Ok(None);
        }
        tracing::info!(id, "medical certificate updated");
        self.medical_certificate_by_id(id)
    }

    pub fn delete_medical_certificate(&self, id: i64) -> ServiceResult<Option<MedicalCertificate>> {
        let removed = self.db.unit_of_work(|db| -> ServiceResult<Option<MedicalCertificate>> {
            let Some(certificate) =
                db.get_by_id::<MedicalCertificate>(NamedQuery::MedicalCertificateFindById, id)?
            else {
                return Ok(None);
            };
            db.delete_medical_certificate(id)?;
            Ok(Some(certificate))
        })?;

        match &removed {
            Some(_) => tracing::info!(id, "medical certificate deleted"),
            None => tracing::warn!(id, "delete of missing medical certificate"),
        }
        Ok(removed)
    }
}

/// Owner and training exist, and the training carries no certificate other
/// than `this`.
fn require_links(
    db: &Database,
    training_id: i64,
    owner_id: i64,
    this: Option<i64>,
) -> ServiceResult<()> {
    if !db.physician_exists(owner_id)? {
        return Err(ServiceError::Precondition(format!(
            "physician {} not found",
            owner_id
        )));
    }
    if !db.medical_training_exists(training_id)? {
        return Err(ServiceError::Precondition(format!(
            "medical training {} not found",
            training_id
        )));
    }
    if let Some(existing) = db.certificate_for_training(training_id)? {
        if Some(existing.id) != this {
            return Err(ServiceError::Precondition(format!(
                "medical training {} already has certificate {}",
                training_id, existing.id
            )));
        }
    }
    Ok(())
}

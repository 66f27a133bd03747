use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::BTreeMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use scholarstream::applications::{Application, ApplicationId, ApplicationRepository};
use scholarstream::catalog::{
    PatchOutcome, QuerySlice, Scholarship, ScholarshipFilter, ScholarshipId, ScholarshipPatch,
    ScholarshipRepository, ScholarshipSort, SortKey, SortOrder,
};
use scholarstream::error::StoreError;
use scholarstream::payments::{Payment, PaymentId, PaymentRepository};
use scholarstream::reviews::{Review, ReviewFilter, ReviewId, ReviewRepository};
use scholarstream::users::{User, UserId, UserRepository};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-wide in-memory document store. Keyed by generated sequence ids,
/// so BTreeMap iteration order is insertion order, which is the
/// "store-native order" the unsorted catalog queries expose.
#[derive(Default, Clone)]
pub(crate) struct InMemoryUserRepository {
    records: Arc<Mutex<BTreeMap<UserId, User>>>,
}

impl UserRepository for InMemoryUserRepository {
    fn insert(&self, user: User) -> Result<(), StoreError> {
        let mut guard = self.records.lock().expect("directory mutex poisoned");
        guard.insert(user.id.clone(), user);
        Ok(())
    }

    fn update(&self, user: User) -> Result<bool, StoreError> {
        let mut guard = self.records.lock().expect("directory mutex poisoned");
        if !guard.contains_key(&user.id) {
            return Ok(false);
        }
        guard.insert(user.id.clone(), user);
        Ok(true)
    }

    fn fetch(&self, id: &UserId) -> Result<Option<User>, StoreError> {
        let guard = self.records.lock().expect("directory mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let guard = self.records.lock().expect("directory mutex poisoned");
        Ok(guard.values().find(|user| user.email == email).cloned())
    }

    fn all(&self) -> Result<Vec<User>, StoreError> {
        let guard = self.records.lock().expect("directory mutex poisoned");
        Ok(guard.values().cloned().collect())
    }

    fn count(&self) -> Result<u64, StoreError> {
        let guard = self.records.lock().expect("directory mutex poisoned");
        Ok(guard.len() as u64)
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryScholarshipRepository {
    records: Arc<Mutex<BTreeMap<ScholarshipId, Scholarship>>>,
}

fn matches(listing: &Scholarship, filter: &ScholarshipFilter) -> bool {
    let text_ok = filter.search.as_deref().map_or(true, |needle| {
        let needle = needle.to_lowercase();
        listing.scholarship_name.to_lowercase().contains(&needle)
            || listing.university_name.to_lowercase().contains(&needle)
            || listing.university_country.to_lowercase().contains(&needle)
    });
    let category_ok = filter
        .category
        .as_deref()
        .map_or(true, |category| listing.subject_category == category);

    text_ok && category_ok
}

fn sort_listings(listings: &mut [Scholarship], sort: ScholarshipSort) {
    listings.sort_by(|a, b| {
        let ordering = match sort.key {
            SortKey::Fees => a.application_fees.total_cmp(&b.application_fees),
            SortKey::PostedDate => a.posted_date.cmp(&b.posted_date),
        };
        match sort.order {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        }
    });
}

impl ScholarshipRepository for InMemoryScholarshipRepository {
    fn insert(&self, listing: Scholarship) -> Result<(), StoreError> {
        let mut guard = self.records.lock().expect("catalog mutex poisoned");
        guard.insert(listing.id.clone(), listing);
        Ok(())
    }

    fn fetch(&self, id: &ScholarshipId) -> Result<Option<Scholarship>, StoreError> {
        let guard = self.records.lock().expect("catalog mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn query(
        &self,
        filter: &ScholarshipFilter,
        sort: Option<ScholarshipSort>,
        skip: u64,
        limit: u64,
    ) -> Result<QuerySlice, StoreError> {
        let guard = self.records.lock().expect("catalog mutex poisoned");
        let mut matching: Vec<Scholarship> = guard
            .values()
            .filter(|listing| matches(listing, filter))
            .cloned()
            .collect();
        drop(guard);

        if let Some(sort) = sort {
            sort_listings(&mut matching, sort);
        }

        let total = matching.len() as u64;
        let items = matching
            .into_iter()
            .skip(skip as usize)
            .take(limit as usize)
            .collect();

        Ok(QuerySlice { items, total })
    }

    fn find_by_owner(&self, email: &str) -> Result<Vec<Scholarship>, StoreError> {
        let guard = self.records.lock().expect("catalog mutex poisoned");
        Ok(guard
            .values()
            .filter(|listing| listing.posted_user_email == email)
            .cloned()
            .collect())
    }

    fn find_related(
        &self,
        category: &str,
        exclude: &ScholarshipId,
        limit: usize,
    ) -> Result<Vec<Scholarship>, StoreError> {
        let guard = self.records.lock().expect("catalog mutex poisoned");
        Ok(guard
            .values()
            .filter(|listing| listing.subject_category == category && &listing.id != exclude)
            .take(limit)
            .cloned()
            .collect())
    }

    fn head(&self, limit: usize) -> Result<Vec<Scholarship>, StoreError> {
        let guard = self.records.lock().expect("catalog mutex poisoned");
        Ok(guard.values().take(limit).cloned().collect())
    }

    fn apply_patch(
        &self,
        id: &ScholarshipId,
        patch: &ScholarshipPatch,
    ) -> Result<PatchOutcome, StoreError> {
        let mut guard = self.records.lock().expect("catalog mutex poisoned");
        let Some(listing) = guard.get_mut(id) else {
            return Ok(PatchOutcome {
                matched: false,
                modified: false,
            });
        };

        let mut modified = false;
        let mut merge_text = |target: &mut String, value: &Option<String>| {
            if let Some(value) = value {
                if target != value {
                    *target = value.clone();
                    modified = true;
                }
            }
        };
        merge_text(&mut listing.scholarship_name, &patch.scholarship_name);
        merge_text(&mut listing.university_name, &patch.university_name);
        merge_text(&mut listing.university_country, &patch.university_country);
        merge_text(&mut listing.subject_category, &patch.subject_category);
        merge_text(&mut listing.scholarship_category, &patch.scholarship_category);
        merge_text(&mut listing.posted_user_email, &patch.posted_user_email);
        if let Some(fees) = patch.application_fees {
            if listing.application_fees != fees {
                listing.application_fees = fees;
                modified = true;
            }
        }

        Ok(PatchOutcome {
            matched: true,
            modified,
        })
    }

    fn delete(&self, id: &ScholarshipId) -> Result<u64, StoreError> {
        let mut guard = self.records.lock().expect("catalog mutex poisoned");
        Ok(guard.remove(id).map(|_| 1).unwrap_or(0))
    }

    fn count(&self) -> Result<u64, StoreError> {
        let guard = self.records.lock().expect("catalog mutex poisoned");
        Ok(guard.len() as u64)
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryApplicationRepository {
    records: Arc<Mutex<BTreeMap<ApplicationId, Application>>>,
}

impl ApplicationRepository for InMemoryApplicationRepository {
    fn insert(&self, application: Application) -> Result<(), StoreError> {
        let mut guard = self.records.lock().expect("applications mutex poisoned");
        guard.insert(application.id.clone(), application);
        Ok(())
    }

    fn fetch(&self, id: &ApplicationId) -> Result<Option<Application>, StoreError> {
        let guard = self.records.lock().expect("applications mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn update(&self, application: Application) -> Result<bool, StoreError> {
        let mut guard = self.records.lock().expect("applications mutex poisoned");
        if !guard.contains_key(&application.id) {
            return Ok(false);
        }
        guard.insert(application.id.clone(), application);
        Ok(true)
    }

    fn find_by_applicant(&self, email: &str) -> Result<Vec<Application>, StoreError> {
        let guard = self.records.lock().expect("applications mutex poisoned");
        Ok(guard
            .values()
            .filter(|application| application.applicant == email)
            .cloned()
            .collect())
    }

    fn find_by_issuer(&self, email: &str) -> Result<Vec<Application>, StoreError> {
        let guard = self.records.lock().expect("applications mutex poisoned");
        Ok(guard
            .values()
            .filter(|application| application.scholar.posted_user_email == email)
            .cloned()
            .collect())
    }

    fn delete(&self, id: &ApplicationId) -> Result<u64, StoreError> {
        let mut guard = self.records.lock().expect("applications mutex poisoned");
        Ok(guard.remove(id).map(|_| 1).unwrap_or(0))
    }

    fn all(&self) -> Result<Vec<Application>, StoreError> {
        let guard = self.records.lock().expect("applications mutex poisoned");
        Ok(guard.values().cloned().collect())
    }

    fn count(&self) -> Result<u64, StoreError> {
        let guard = self.records.lock().expect("applications mutex poisoned");
        Ok(guard.len() as u64)
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryPaymentRepository {
    records: Arc<Mutex<BTreeMap<PaymentId, Payment>>>,
}

impl PaymentRepository for InMemoryPaymentRepository {
    fn insert(&self, payment: Payment) -> Result<(), StoreError> {
        let mut guard = self.records.lock().expect("ledger mutex poisoned");
        guard.insert(payment.id.clone(), payment);
        Ok(())
    }

    fn all(&self) -> Result<Vec<Payment>, StoreError> {
        let guard = self.records.lock().expect("ledger mutex poisoned");
        Ok(guard.values().cloned().collect())
    }

    fn count(&self) -> Result<u64, StoreError> {
        let guard = self.records.lock().expect("ledger mutex poisoned");
        Ok(guard.len() as u64)
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryReviewRepository {
    records: Arc<Mutex<BTreeMap<ReviewId, Review>>>,
}

impl ReviewRepository for InMemoryReviewRepository {
    fn insert(&self, review: Review) -> Result<(), StoreError> {
        let mut guard = self.records.lock().expect("reviews mutex poisoned");
        guard.insert(review.id.clone(), review);
        Ok(())
    }

    fn fetch(&self, id: &ReviewId) -> Result<Option<Review>, StoreError> {
        let guard = self.records.lock().expect("reviews mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn update(&self, review: Review) -> Result<bool, StoreError> {
        let mut guard = self.records.lock().expect("reviews mutex poisoned");
        if !guard.contains_key(&review.id) {
            return Ok(false);
        }
        guard.insert(review.id.clone(), review);
        Ok(true)
    }

    fn find(&self, filter: &ReviewFilter) -> Result<Vec<Review>, StoreError> {
        let guard = self.records.lock().expect("reviews mutex poisoned");
        Ok(guard
            .values()
            .filter(|review| {
                filter
                    .scholarship_id
                    .as_deref()
                    .map_or(true, |id| review.scholarship_id == id)
                    && filter
                        .user_email
                        .as_deref()
                        .map_or(true, |email| review.user_email == email)
                    && filter
                        .post_by_email
                        .as_deref()
                        .map_or(true, |email| review.post_by_email == email)
            })
            .cloned()
            .collect())
    }

    fn delete(&self, id: &ReviewId) -> Result<u64, StoreError> {
        let mut guard = self.records.lock().expect("reviews mutex poisoned");
        Ok(guard.remove(id).map(|_| 1).unwrap_or(0))
    }
}

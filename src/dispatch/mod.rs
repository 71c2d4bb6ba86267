//! Keyword dispatcher — maps a free-text question to a demo bundle.
//!
//! This is deliberately not NLP. The demo understands exactly the phrasings
//! its example questions use, via ordered substring rules over the
//! lower-cased input. The function is total: anything unmatched falls back
//! to the regions bundle, so there is no "I didn't understand" path.
//!
//! Rule order matters — "compare the regions" must reach the comparison
//! rule, so the regions rule explicitly excludes "compare".

use crate::bundle::BundleKind;

/// Pick the bundle for a question.
///
/// Rules, checked in order against the lower-cased question:
///
/// 1. contains `region` and not `compare` → [`BundleKind::Regions`]
/// 2. contains `product` and (`top` or `revenue`) → [`BundleKind::Products`]
/// 3. contains `compare`, or both `north` and `south` → [`BundleKind::Comparison`]
/// 4. contains `category` or `distribution` → [`BundleKind::Categories`]
/// 5. otherwise → [`BundleKind::Regions`] (default)
pub fn dispatch(question: &str) -> BundleKind {
    let q = question.to_lowercase();

    if q.contains("region") && !q.contains("compare") {
        BundleKind::Regions
    } else if q.contains("product") && (q.contains("top") || q.contains("revenue")) {
        BundleKind::Products
    } else if q.contains("compare") || (q.contains("north") && q.contains("south")) {
        BundleKind::Comparison
    } else if q.contains("category") || q.contains("distribution") {
        BundleKind::Categories
    } else {
        BundleKind::Regions
    }
}

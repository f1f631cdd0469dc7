//! SQL for the publications schema
//!
//! Every per-publication lookup binds the identifier as `$1::BIGINT`, so the
//! parameter type does not depend on how the `pub_id` columns are declared.
//! Selected values are cast to `TEXT` (identifiers to `BIGINT`) so `NUMERIC`,
//! `DATE` or other column types read the same as `VARCHAR` ones.

/// All publications, one row each
pub const PUBLICATIONS: &str = "SELECT pub_id::BIGINT AS pub_id, \
     title::TEXT AS title, \
     abstract::TEXT AS abstract, \
     year::TEXT AS year, \
     pub_file::TEXT AS pub_file \
     FROM pubs_main";

/// Journal citations of one publication
pub const JOURNALS: &str = "SELECT journal::TEXT AS journal, \
     volume::TEXT AS volume, \
     spage::TEXT AS spage, \
     epage::TEXT AS epage, \
     extent::TEXT AS extent \
     FROM pubs_journal_new \
     WHERE pub_id = $1::BIGINT";

/// Authors of one publication, in link-table order
pub const AUTHORS: &str = "SELECT fname::TEXT AS fname, lname::TEXT AS lname \
     FROM pubs_author \
     INNER JOIN pubs_main_auth_lnk lnk ON lnk.f_author_id = pubs_author.author_id \
     WHERE f_pub_id = $1::BIGINT";

/// Categories of one publication
pub const SUBJECTS: &str = "SELECT name::TEXT AS name \
     FROM pubs_category \
     INNER JOIN pubs_main_cat_lnk lnk ON lnk.f_category_id = pubs_category.category_id \
     WHERE f_pub_id = $1::BIGINT";

/// Tags of one publication
pub const KEYWORDS: &str = "SELECT name::TEXT AS name \
     FROM pubs_tag \
     INNER JOIN pubs_main_tag_lnk lnk ON lnk.f_tag_id = pubs_tag.tag_id \
     WHERE f_pub_id = $1::BIGINT";

//! Authentication: JWT access tokens. Password hashing lives in
//! `ez2hire_workflows::password` so account provisioning can share it.

pub mod jwt;

//! Zakat al-Mal: wealth that becomes zakatable once it reaches nisab.

pub mod gold;
pub mod income;

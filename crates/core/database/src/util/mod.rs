pub mod join;

#[cfg(test)]
pub mod test_fixtures;

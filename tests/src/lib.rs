//! Cross-crate tests: the services wired to loopback sockets and to mocks of
//! the outbound ports.

#[cfg(test)]
mod discovery;
#[cfg(test)]
mod health;
#[cfg(test)]
mod launch;
#[cfg(test)]
mod support;
#[cfg(test)]
mod urls;

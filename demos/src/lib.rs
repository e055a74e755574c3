// Copyright 2025 the Gridshift Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Runnable demos for the Gridshift crates. See the `examples/` directory.

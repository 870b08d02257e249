//! Go sources shared by the integration tests

#![allow(dead_code)]

use docsync_content::DeclarationTree;

/// English package as shipped upstream.
pub const HEAP_EN: &str = r#"// Copyright 2009 The Go Authors. All rights reserved.

// Package heap provides heap operations for any type that implements
// heap.Interface.
package heap // import "container/heap"

import (
	"sort"
)

// Error codes.
const (
	// OK is success.
	OK Code = 0
	Fail Code = 1
)

// An Item is something we manage in a priority queue.
type Item struct {
	// The value of the item.
	value string
}

// Pop removes the minimum element (according to Less) from the heap.
func Pop(h Interface) any {
	n := h.Len() - 1
	return h.Pop()
}
"#;

/// The same package with its documentation translated.
pub const HEAP_ZH: &str = r#"// Copyright 2009 The Go Authors. All rights reserved.

// heap 包为任何实现了 heap.Interface 的类型提供堆操作。
package heap // import "container/heap"

import (
	"sort"
)

// 错误码。
const (
	// OK 表示成功。
	OK Code = 0
	Fail Code = 1
)

// Item 是优先队列中管理的元素。
type Item struct {
	// 元素的值。
	value string
}

// Pop 从堆中移除最小元素（根据 Less）。
func Pop(h Interface) any {
	n := h.Len() - 1
	return h.Pop()
}
"#;

pub fn load(source: &str, name: &str) -> DeclarationTree {
    docsync_go::parse(source, Some(name)).expect("fixture parses")
}

/// The bilingual `doc_zh_CN.go` produced by merging the translation into
/// the English package.
pub fn bilingual_zh_cn() -> String {
    let source = load(HEAP_ZH, "heap_zh.go");
    let mut target = load(HEAP_EN, "heap.go");
    docsync_content::merge(&source, &mut target).expect("merge succeeds");
    docsync_content::render_source(&target).expect("render succeeds")
}
